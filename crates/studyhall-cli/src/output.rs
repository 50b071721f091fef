use std::io::Write;

use owo_colors::OwoColorize;
use studyhall_core::{NoteInsights, QuizQuestion};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the AI-derived insights for a document.
pub fn print_insights(
    w: &mut dyn Write,
    title: &str,
    insights: &NoteInsights,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", title.bold())?;
    } else {
        writeln!(w, "{}", title)?;
    }
    writeln!(w)?;

    if color.enabled() {
        writeln!(w, "{}", "Summary".green())?;
    } else {
        writeln!(w, "Summary")?;
    }
    writeln!(w, "{}", insights.summary)?;
    writeln!(w)?;

    if !insights.keywords.is_empty() {
        if color.enabled() {
            writeln!(w, "{}", "Keywords".green())?;
        } else {
            writeln!(w, "Keywords")?;
        }
        writeln!(w, "{}", insights.keywords.join(", "))?;
        writeln!(w)?;
    }

    if !insights.mindmap.is_empty() {
        if color.enabled() {
            writeln!(w, "{}", "Mind map".green())?;
        } else {
            writeln!(w, "Mind map")?;
        }
        writeln!(w, "{}", insights.mindmap)?;
    }
    Ok(())
}

/// Print a generated quiz with its answer key at the end.
pub fn print_quiz(
    w: &mut dyn Write,
    topic: &str,
    questions: &[QuizQuestion],
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", format!("Quiz: {}", topic).bold())?;
    } else {
        writeln!(w, "Quiz: {}", topic)?;
    }
    writeln!(w)?;

    if questions.is_empty() {
        writeln!(w, "No usable questions were generated.")?;
        return Ok(());
    }

    for (i, q) in questions.iter().enumerate() {
        writeln!(w, "{}. {}", i + 1, q.question)?;
        for (j, option) in q.options.iter().enumerate() {
            let letter = (b'a' + j as u8) as char;
            writeln!(w, "   {}) {}", letter, option)?;
        }
        writeln!(w)?;
    }

    if color.enabled() {
        writeln!(w, "{}", "Answer key".green())?;
    } else {
        writeln!(w, "Answer key")?;
    }
    for (i, q) in questions.iter().enumerate() {
        let letter = (b'a' + q.correct_answer as u8) as char;
        if q.explanation.is_empty() {
            writeln!(w, "{}. {}", i + 1, letter)?;
        } else {
            writeln!(w, "{}. {}: {}", i + 1, letter, q.explanation)?;
        }
    }
    Ok(())
}
