// src/export.rs
//! Flattens the displayed prompts and metadata into one downloadable text file

use crate::types::{BilingualMeta, PromptBundle, ScenarioMode};

pub const DEFAULT_FILENAME: &str = "generated-content";
const MAX_SLUG_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Slug without extension
    pub stem: String,
    pub content: String,
}

impl ExportDocument {
    pub fn filename(&self) -> String {
        format!("{}.txt", self.stem)
    }
}

/// Returns `None` when there is nothing to export
pub fn build_export(
    prompts: &PromptBundle,
    meta: Option<&BilingualMeta>,
    mode: ScenarioMode,
) -> Option<ExportDocument> {
    if prompts.is_empty() && meta.is_none() {
        return None;
    }

    let mut content = String::new();

    if mode == ScenarioMode::Analyze && !prompts.image_prompts.is_empty() {
        for (index, image_prompt) in prompts.image_prompts.iter().enumerate() {
            let scene = index + 1;
            content.push_str(&format!("--- SCENE {} IMAGE PROMPT ---\n{}\n\n", scene, image_prompt));
            if let Some(video_prompt) = prompts.video_prompts.get(index).filter(|p| !p.is_empty()) {
                content.push_str(&format!("--- SCENE {} VIDEO PROMPT ---\n{}\n\n", scene, video_prompt));
            }
        }
    } else {
        if !prompts.image_prompts.is_empty() {
            content.push_str("--- GENERATED IMAGE PROMPT ---\n");
            content.push_str(&prompts.image_prompts.join("\n\n"));
            content.push_str("\n\n");
        }
        if !prompts.video_prompts.is_empty() {
            content.push_str("--- GENERATED VIDEO PROMPT ---\n");
            content.push_str(&prompts.video_prompts.join("\n\n"));
            content.push_str("\n\n");
        }
    }

    if let Some(meta) = meta {
        content.push_str("--- YOUTUBE SHORTS META ---\n");
        content.push_str(&meta.combined_text());
        content.push('\n');
    }

    let stem = meta
        .map(|m| sanitize_filename(&m.en.title))
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

    Some(ExportDocument {
        stem,
        content: content.trim().to_string(),
    })
}

/// Lower-cases, keeps `[a-z0-9]`, whitespace and hyphens, joins words with single hyphens
/// and caps the result at 50 characters.
pub fn sanitize_filename(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let slug: String = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(MAX_SLUG_CHARS)
        .collect();

    if slug.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalizedMeta;

    fn meta(title: &str) -> BilingualMeta {
        BilingualMeta {
            en: LocalizedMeta { title: title.into(), description: "English desc #wild".into() },
            hi: LocalizedMeta { title: "हिंदी शीर्षक".into(), description: "हिंदी विवरण".into() },
        }
    }

    #[test]
    fn test_empty_state_exports_nothing() {
        assert!(build_export(&PromptBundle::default(), None, ScenarioMode::Celebration).is_none());
        assert!(build_export(&PromptBundle::default(), None, ScenarioMode::Analyze).is_none());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Epic Jaguar Vs Caiman!!"), "epic-jaguar-vs-caiman");
        assert_eq!(sanitize_filename("  Moose   vs  Bear  "), "moose-vs-bear");
        assert_eq!(sanitize_filename("!!!"), DEFAULT_FILENAME);
        assert_eq!(sanitize_filename("जंगल"), DEFAULT_FILENAME);
        let long = "word ".repeat(30);
        assert_eq!(sanitize_filename(&long).chars().count(), 50);
    }

    #[test]
    fn test_template_mode_document() {
        let prompts = PromptBundle::single("image text".into(), "video text".into());
        let doc = build_export(&prompts, Some(&meta("Epic Jaguar Vs Caiman!!")), ScenarioMode::Faceoff).unwrap();

        assert_eq!(doc.filename(), "epic-jaguar-vs-caiman.txt");
        assert!(doc.content.starts_with("--- GENERATED IMAGE PROMPT ---\nimage text\n\n--- GENERATED VIDEO PROMPT ---\nvideo text"));
        let english = doc.content.find("--- ENGLISH ---").unwrap();
        let hindi = doc.content.find("--- HINDI ---").unwrap();
        assert!(english < hindi);
        assert!(doc.content.ends_with("Description: हिंदी विवरण"));
    }

    #[test]
    fn test_analyze_mode_document() {
        let prompts = PromptBundle {
            image_prompts: vec!["i1".into(), "i2".into(), "i3".into()],
            video_prompts: vec!["v1".into(), String::new(), "v3".into()],
        };
        let doc = build_export(&prompts, None, ScenarioMode::Analyze).unwrap();

        assert_eq!(doc.filename(), "generated-content.txt");
        assert!(doc.content.contains("--- SCENE 1 IMAGE PROMPT ---\ni1\n\n--- SCENE 1 VIDEO PROMPT ---\nv1"));
        assert!(doc.content.contains("--- SCENE 2 IMAGE PROMPT ---\ni2\n\n--- SCENE 3 IMAGE PROMPT ---"));
        assert!(!doc.content.contains("SCENE 2 VIDEO"));
        assert!(doc.content.ends_with("v3"));
        assert!(!doc.content.contains("YOUTUBE SHORTS META"));
    }

    #[test]
    fn test_meta_only_document() {
        let doc = build_export(&PromptBundle::default(), Some(&meta("Hello World")), ScenarioMode::Celebration).unwrap();
        assert!(doc.content.starts_with("--- YOUTUBE SHORTS META ---\n--- ENGLISH ---"));
        assert_eq!(doc.stem, "hello-world");
    }
}
