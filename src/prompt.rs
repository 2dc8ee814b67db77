use crate::models::{ContentType, Language, Tone};

const SECTION_SEPARATOR: &str = " → ";
const CLOSING_INSTRUCTION: &str =
    "Make the content comprehensive, well-structured, and actionable, with concrete examples where they help.";

// Instructional preamble and ordered sections for one content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTemplate {
    pub preamble: &'static str,
    pub sections: &'static [&'static str],
}

const PRESENTATION: ContentTemplate = ContentTemplate {
    preamble: "Create a detailed presentation outline with slide titles and key talking points for each slide.",
    sections: &[
        "Title Slide",
        "Introduction",
        "Key Concepts",
        "Main Points",
        "Case Studies",
        "Implementation",
        "Conclusion",
        "Q&A",
    ],
};

const DOCUMENT: ContentTemplate = ContentTemplate {
    preamble: "Write a comprehensive, well-organized document with clear headings and thorough explanations.",
    sections: &[
        "Executive Summary",
        "Introduction",
        "Background",
        "Analysis",
        "Recommendations",
        "Conclusion",
    ],
};

const SOCIAL: ContentTemplate = ContentTemplate {
    preamble: "Write an engaging social media post that grabs attention and encourages interaction.",
    sections: &["Hook", "Key Message", "Supporting Points", "Call to Action", "Hashtags"],
};

const BLOG: ContentTemplate = ContentTemplate {
    preamble: "Write an engaging, informative blog post that readers will want to finish and share.",
    sections: &[
        "Catchy Title",
        "Introduction",
        "Main Content",
        "Practical Tips",
        "Conclusion",
        "Call to Action",
    ],
};

const EMAIL: ContentTemplate = ContentTemplate {
    preamble: "Write a clear, well-structured email that communicates its purpose effectively.",
    sections: &["Subject Line", "Greeting", "Purpose", "Details", "Next Steps", "Closing"],
};

pub fn template_for(content_type: ContentType) -> &'static ContentTemplate {
    match content_type {
        ContentType::Presentation => &PRESENTATION,
        ContentType::Document => &DOCUMENT,
        ContentType::Social => &SOCIAL,
        ContentType::Blog => &BLOG,
        ContentType::Email => &EMAIL,
    }
}

fn language_directive(language: Language) -> Option<String> {
    match language {
        Language::English => None,
        other => Some(format!(
            "Write the entire content in {}.",
            other.display_name()
        )),
    }
}

fn tone_directive(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "Use a professional, authoritative tone suitable for business audiences.",
        Tone::Casual => "Use a casual, conversational tone as if talking to a friend.",
        Tone::Friendly => "Use a warm, friendly and approachable tone.",
        Tone::Formal => "Use a formal tone with precise language and no colloquialisms.",
        Tone::Persuasive => "Use a persuasive tone that builds a compelling case and motivates action.",
        Tone::Informative => "Use an informative, educational tone focused on clear explanations.",
    }
}

/// Composes the provider-agnostic prompt. Parts are joined by blank lines and
/// the section names keep the template's declared order.
pub fn build_prompt(
    topic: &str,
    template: &ContentTemplate,
    language: Language,
    tone: Tone,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(6);
    parts.push(template.preamble.to_string());
    if let Some(directive) = language_directive(language) {
        parts.push(directive);
    }
    parts.push(tone_directive(tone).to_string());
    parts.push(format!("Topic: {}", topic));
    parts.push(format!(
        "Structure: {}",
        template.sections.join(SECTION_SEPARATOR)
    ));
    parts.push(CLOSING_INSTRUCTION.to_string());
    parts.join("\n\n")
}
