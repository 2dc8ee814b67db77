//! Template content used when no provider produced anything.
//!
//! Everything here is pure string formatting: the same inputs always give
//! byte-identical output and nothing can fail.

use crate::models::{ContentType, Language, Tone};

pub fn generate_fallback(
    topic: &str,
    content_type: ContentType,
    language: Language,
    tone: Tone,
) -> String {
    let body = match content_type {
        ContentType::Presentation => presentation(topic),
        ContentType::Document => document(topic),
        ContentType::Social => social(topic),
        ContentType::Blog => blog(topic),
        ContentType::Email => email(topic),
    };

    let mut prefix = String::new();
    if language != Language::English {
        prefix.push_str(&format!("[Content in {}]\n", language.display_name()));
    }
    if tone != Tone::Professional {
        prefix.push_str(&format!("[Tone: {}]\n", tone.display_name()));
    }

    if prefix.is_empty() {
        body
    } else {
        format!("{}\n{}", prefix, body)
    }
}

fn hashtag(topic: &str) -> String {
    topic
        .split_whitespace()
        .map(|word| {
            let word: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn presentation(topic: &str) -> String {
    format!(
        r#"# {topic}

## Slide 1: Title
- {topic}
- A practical overview

## Slide 2: Introduction
- Why {topic} matters today
- What this presentation covers
- Expected outcomes for the audience

## Slide 3: Key Concepts
- Core principles behind {topic}
- Common terminology
- How the pieces fit together

## Slide 4: Current Landscape
- Where {topic} stands today
- Main trends and drivers
- Challenges that remain

## Slide 5: Benefits
- Efficiency and cost improvements
- Better decision making
- Long-term strategic value

## Slide 6: Implementation
- Assess the current situation
- Define goals and success metrics
- Start with a focused pilot
- Scale based on results

## Slide 7: Conclusion
- {topic} offers clear, measurable value
- Start small, learn fast, expand deliberately

## Slide 8: Questions & Discussion
- Open floor for questions about {topic}
"#
    )
}

fn document(topic: &str) -> String {
    format!(
        r#"# {topic}

## Executive Summary

This document provides an overview of {topic}, covering its background, the current state of practice, and recommendations for moving forward.

## Introduction

{topic} has become an important subject for organizations and individuals alike. Understanding its fundamentals helps teams make informed decisions and avoid common pitfalls.

## Background

The development of {topic} has been shaped by changing needs, new technology, and lessons learned from early adopters. Its history explains many of the practices in use today.

## Analysis

### Strengths
- Clear potential for improved outcomes
- Growing body of proven practices
- Broad applicability across contexts

### Challenges
- Initial investment of time and resources
- Need for new skills and training
- Integration with existing processes

## Recommendations

1. Build a shared understanding of {topic} across stakeholders
2. Identify a high-value starting point
3. Define measurable success criteria
4. Review progress regularly and adjust

## Conclusion

{topic} presents meaningful opportunities. A structured, incremental approach maximizes the benefits while keeping risk under control.
"#
    )
}

fn social(topic: &str) -> String {
    let tag = hashtag(topic);
    format!(
        r#"🚀 Let's talk about {topic}!

Here's why it deserves your attention:

✅ It changes how we approach everyday challenges
✅ Small steps lead to big results
✅ The best time to start is now

What's your experience with {topic}? Share your thoughts below! 👇

#{tag} #Innovation #Growth #LearnSomethingNew
"#
    )
}

fn blog(topic: &str) -> String {
    format!(
        r#"# {topic}: What You Need to Know

## Introduction

{topic} is getting a lot of attention, and for good reason. In this post we look at what it is, why it matters, and how you can put it to work.

## Why {topic} Matters

Whether you are just getting started or already have some experience, understanding {topic} can help you make better decisions and stay ahead of change.

## Key Insights

### 1. Start With the Fundamentals
A solid grasp of the basics makes everything else easier.

### 2. Learn From Others
Plenty of people have already explored {topic}. Their successes and mistakes are a valuable shortcut.

### 3. Take Practical Steps
Progress comes from action. Pick one small change and try it this week.

## Practical Tips

- Set a clear goal before you begin
- Measure your results
- Stay curious and keep iterating

## Conclusion

{topic} offers real opportunities to those willing to invest a little time in understanding it. Start small, stay consistent, and build from there.

*What are your thoughts on {topic}? Leave a comment and join the conversation.*
"#
    )
}

fn email(topic: &str) -> String {
    format!(
        r#"Subject: {topic}

Hello,

I hope this message finds you well.

I am writing to share some thoughts on {topic} and to propose next steps.

Key points:
- {topic} is relevant to our current priorities
- There are clear opportunities we can act on
- A short discussion would help us align on an approach

Next steps:
1. Review the points above
2. Share any questions or concerns
3. Schedule a brief meeting to agree on a plan

Please let me know a time that works for you.

Best regards
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_scenario_without_prefix() {
        let content = generate_fallback(
            "renewable energy adoption",
            ContentType::Blog,
            Language::English,
            Tone::Professional,
        );

        assert!(content.starts_with("# renewable energy adoption: What You Need to Know"));
        assert!(content.contains("## Why renewable energy adoption Matters"));
        assert!(!content.contains("[Content in"));
        assert!(!content.contains("[Tone:"));
    }

    #[test]
    fn test_spanish_marker_comes_first() {
        let content = generate_fallback(
            "energía solar",
            ContentType::Document,
            Language::Spanish,
            Tone::Professional,
        );
        assert!(content.starts_with("[Content in Spanish]\n"));
        assert!(content.contains("# energía solar"));
    }

    #[test]
    fn test_language_and_tone_markers_order() {
        let content = generate_fallback(
            "team offsite",
            ContentType::Email,
            Language::German,
            Tone::Casual,
        );
        assert!(content.starts_with("[Content in German]\n[Tone: Casual]\n\nSubject: team offsite"));
    }

    #[test]
    fn test_tone_marker_only() {
        let content = generate_fallback(
            "product launch",
            ContentType::Presentation,
            Language::English,
            Tone::Persuasive,
        );
        assert!(content.starts_with("[Tone: Persuasive]\n\n# product launch"));
    }

    #[test]
    fn test_fallback_is_deterministic_and_non_empty() {
        for content_type in ContentType::ALL {
            let a = generate_fallback("edge ai", content_type, Language::Italian, Tone::Formal);
            let b = generate_fallback("edge ai", content_type, Language::Italian, Tone::Formal);
            assert_eq!(a, b);
            assert!(a.contains("edge ai"));
        }
    }

    #[test]
    fn test_social_hashtag() {
        let content = generate_fallback(
            "remote work, tips!",
            ContentType::Social,
            Language::English,
            Tone::Professional,
        );
        assert!(content.contains("#RemoteWorkTips"));
    }
}
