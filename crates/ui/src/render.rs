//! Plain-text rendering of the view models, for terminal front ends.

use std::fmt::{self, Write};

use lesson_core::Outcome;
use lesson_core::model::StageStatus;

use crate::vm::{ConnectorState, LessonCardVm, OptionState, ProgressVm};

const BAR_WIDTH: u32 = 20;

fn stage_marker(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Completed => "[x]",
        StageStatus::Current => "[>]",
        StageStatus::Locked => "[ ]",
    }
}

fn option_marker(state: OptionState) -> &'static str {
    match state {
        OptionState::Idle => "( )",
        OptionState::Selected => "(*)",
        OptionState::Correct => "(+)",
        OptionState::Incorrect => "(-)",
    }
}

fn progress_bar(percent: u32) -> String {
    let filled = percent.min(100) * BAR_WIDTH / 100;
    let filled = usize::try_from(filled).unwrap_or(0);
    let empty = usize::try_from(BAR_WIDTH).unwrap_or(0).saturating_sub(filled);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_progress(out: &mut impl Write, vm: &ProgressVm) -> fmt::Result {
    for (index, row) in vm.rows.iter().enumerate() {
        write!(
            out,
            "{} {} ({})",
            stage_marker(row.status),
            row.title,
            row.lessons_label
        )?;
        match vm.connectors.get(index) {
            Some(ConnectorState::Active) => write!(out, " ==> ")?,
            Some(ConnectorState::Inactive) => write!(out, " --> ")?,
            None => writeln!(out)?,
        }
    }
    writeln!(out, "Total progress: {}", vm.overall_label)?;

    if let Some(current) = &vm.current {
        writeln!(
            out,
            "Currently learning: {} {} {}",
            current.title,
            progress_bar(current.percent),
            current.percent_label
        )?;
    }
    Ok(())
}

/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_lesson_card(out: &mut impl Write, vm: &LessonCardVm) -> fmt::Result {
    writeln!(out, "{}  |  {} ({})", vm.position_label, vm.title, vm.time_estimate)?;
    if !vm.description.is_empty() {
        writeln!(out, "{}", vm.description)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", vm.prompt)?;

    if let Some(code) = &vm.code {
        writeln!(out)?;
        for line in code.lines() {
            writeln!(out, "    {line}")?;
        }
    }

    writeln!(out)?;
    for (index, option) in vm.options.iter().enumerate() {
        writeln!(
            out,
            "  {} {}. [{}] {}",
            option_marker(option.state),
            index + 1,
            option.id,
            option.text
        )?;
        if let Some(explanation) = &option.explanation {
            writeln!(out, "        {explanation}")?;
        }
    }

    match vm.result {
        Outcome::Correct => writeln!(out, "\nResult: correct")?,
        Outcome::Incorrect => writeln!(out, "\nResult: incorrect")?,
        Outcome::Unknown => {}
    }

    if let Some(hint) = &vm.hint {
        writeln!(out, "\nHint: {hint}")?;
    }

    let mut buttons = Vec::with_capacity(vm.actions.len() + 1);
    buttons.push(&vm.hint_button);
    buttons.extend(vm.actions.iter());
    let labels: Vec<String> = buttons
        .iter()
        .map(|button| {
            if button.disabled {
                format!("({})", button.label)
            } else {
                format!("[{}]", button.label)
            }
        })
        .collect();
    writeln!(out, "\n{}", labels.join("  "))
}

#[must_use]
pub fn render_progress(vm: &ProgressVm) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_progress(&mut out, vm);
    out
}

#[must_use]
pub fn render_lesson_card(vm: &LessonCardVm) -> String {
    let mut out = String::new();
    let _ = write_lesson_card(&mut out, vm);
    out
}
