// templates.rs - Fixed prompt templates for the celebration and face-off scenarios
use rand::Rng;

/// Creatures that burst out of the subject in the celebration video
pub const EMERGING_CREATURES: [&str; 10] = [
    "bioluminescent frogs",
    "iridescent beetles",
    "tiny, jewel-toned hummingbirds",
    "swirling golden fish",
    "a cloud of silver moths",
    "scuttling crabs made of obsidian",
    "glowing butterflies",
    "miniature, clockwork dragons",
    "spiders weaving starlight",
    "sentient, crystalline flowers",
];

/// "Giant Snake" -> "snake", "Moose" -> "moose"
pub fn short_subject_name(subject: &str) -> String {
    let words: Vec<&str> = subject.split_whitespace().collect();
    let short = if words.len() > 1 {
        words[1..].join(" ")
    } else {
        subject.trim().to_string()
    };
    short.to_lowercase()
}

pub fn celebration_image_prompt(subject: &str, backdrop: &str) -> String {
    format!(
        "On the muddy ground of a {backdrop}, a massive {subject} lies on the ground in the center of the frame. \
Several elderly women stand symmetrically on both sides of the {short}, celebrating and holding red-handled axes high above their heads. \
The women wear patterned dresses and aprons and are barefoot. \
The atmosphere is joyful, as if they’ve just made an incredible catch. \
Ultra-realistic, cinematic lighting, 8K detail, documentary-style composition, ultra real photo.",
        backdrop = backdrop.to_lowercase(),
        subject = subject.to_lowercase(),
        short = short_subject_name(subject),
    )
}

pub fn celebration_video_prompt(subject: &str, backdrop: &str) -> String {
    let mut rng = rand::thread_rng();
    celebration_video_prompt_with_rng(subject, backdrop, &mut rng)
}

pub fn celebration_video_prompt_with_rng<R: Rng + ?Sized>(
    subject: &str,
    backdrop: &str,
    rng: &mut R,
) -> String {
    let creature = EMERGING_CREATURES[rng.gen_range(0..EMERGING_CREATURES.len())];
    let short = short_subject_name(subject);

    format!(
        "Generate a surreal, ultra-realistic cinematic video based on the attached image.
The scene takes place in a {backdrop} where several elderly women in traditional long dresses and aprons stand on both sides of a {subject} lying on the muddy ground.
They raise their axes and strike the {short}’s body several times.
With each strike, the {short}’s hide splits open, and dozens of {creature} begin emerging from inside, twisting and scattering across the ground.
The women continue striking in a synchronized rhythm, while the camera slowly tracks forward, capturing the intense, surreal moment in cinematic slow motion.
Natural cloudy lighting, cinematic tone, gritty realism, 8K detail, shallow depth of field, dramatic perspective.
The motion should feel immersive, as if captured by a handheld camera with subtle shake and realistic sound of axes hitting flesh.",
        backdrop = backdrop.to_lowercase(),
        subject = subject.to_lowercase(),
    )
}

pub fn faceoff_image_prompt(subject_a: &str, subject_b: &str, backdrop: &str) -> String {
    format!(
        "In a dramatic, wide-angle shot, a massive {a} and an equally formidable {b} face off in the middle of a {backdrop}. \
The atmosphere is thick with tension as they stare each other down, moments before a clash. \
The {short_a} is poised on the left, snarling, while the {short_b} stands its ground on the right, muscles tensed. \
The lighting is harsh and dramatic, casting long shadows. \
Ultra-realistic, cinematic lighting, 8K detail, documentary-style composition, ultra real photo.",
        a = subject_a.to_lowercase(),
        b = subject_b.to_lowercase(),
        backdrop = backdrop.to_lowercase(),
        short_a = short_subject_name(subject_a),
        short_b = short_subject_name(subject_b),
    )
}

pub fn faceoff_video_prompt(subject_a: &str, subject_b: &str, backdrop: &str) -> String {
    format!(
        "Generate a surreal, ultra-realistic cinematic video of a fierce battle between a {a} and a {b} in a {backdrop}. \
The fight is brutal and primal, with the two creatures lunging, biting, and clawing at each other. \
The camera is dynamic, using a mix of slow-motion shots to emphasize powerful impacts and fast-paced, shaky handheld shots to convey the chaos of the fight. \
Debris flies, and the ground is torn up. \
Natural cloudy lighting, cinematic tone, gritty realism, 8K detail.",
        a = subject_a.to_lowercase(),
        b = subject_b.to_lowercase(),
        backdrop = backdrop.to_lowercase(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_short_subject_name() {
        assert_eq!(short_subject_name("Giant Snake"), "snake");
        assert_eq!(short_subject_name("Moose"), "moose");
        assert_eq!(short_subject_name("Huge Wild Boar"), "wild boar");
    }

    #[test]
    fn test_celebration_image_prompt_lowercases_inputs() {
        let prompt = celebration_image_prompt("Grizzly Bear", "Boreal Forest");
        assert!(prompt.contains("muddy ground of a boreal forest"));
        assert!(prompt.contains("a massive grizzly bear lies"));
        assert!(prompt.contains("both sides of the bear,"));
        assert!(!prompt.contains("Grizzly"));
        assert!(prompt.ends_with("ultra real photo."));
    }

    #[test]
    fn test_celebration_video_prompt_embeds_one_creature() {
        let mut rng = StdRng::seed_from_u64(7);
        let prompt = celebration_video_prompt_with_rng("Giant Snake", "Dense Jungle", &mut rng);
        assert!(prompt.contains("in a dense jungle where"));
        assert!(prompt.contains("strike the snake’s body"));
        let hits = EMERGING_CREATURES.iter().filter(|c| prompt.contains(*c)).count();
        assert!(hits >= 1);
    }

    #[test]
    fn test_celebration_video_prompt_deterministic_for_same_seed() {
        let a = celebration_video_prompt_with_rng("Moose", "Salt Flats", &mut StdRng::seed_from_u64(42));
        let b = celebration_video_prompt_with_rng("Moose", "Salt Flats", &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_faceoff_prompts() {
        let image = faceoff_image_prompt("Moose", "Grizzly Bear", "Boreal Forest");
        assert!(image.contains("a massive moose and an equally formidable grizzly bear"));
        assert!(image.contains("middle of a boreal forest"));
        assert!(image.contains("The moose is poised on the left"));
        assert!(image.contains("the bear stands its ground"));

        let video = faceoff_video_prompt("Moose", "Grizzly Bear", "Boreal Forest");
        assert!(video.contains("between a moose and a grizzly bear in a boreal forest"));
    }
}
