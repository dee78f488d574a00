use lesson_core::model::{Answer, AnswerId};
use lesson_core::{Outcome, QuestionSession};
use services::DemoSession;

/// How an answer option is highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardAction {
    ToggleHint,
    Skip,
    Explain,
    Continue,
    TryAgain,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonVm {
    pub action: CardAction,
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub id: AnswerId,
    pub text: String,
    pub state: OptionState,
    /// Only present under the selected answer once the question is resolved.
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCardVm {
    pub position_label: String,
    pub title: String,
    pub time_estimate: String,
    pub description: String,
    pub prompt: String,
    pub code: Option<String>,
    pub options: Vec<AnswerOptionVm>,
    pub result: Outcome,
    pub hint: Option<String>,
    pub hint_button: ButtonVm,
    pub actions: Vec<ButtonVm>,
}

fn option_state(session: &QuestionSession, answer: &Answer) -> OptionState {
    let state = session.state();
    if state.selected() != Some(answer.id()) {
        return OptionState::Idle;
    }
    match (state.is_resolved(), answer.is_correct()) {
        (false, _) => OptionState::Selected,
        (true, true) => OptionState::Correct,
        (true, false) => OptionState::Incorrect,
    }
}

fn actions_for(session: &QuestionSession) -> Vec<ButtonVm> {
    let snapshot = session.snapshot();
    if !snapshot.resolved {
        return vec![
            ButtonVm {
                action: CardAction::Skip,
                label: "Skip",
                disabled: false,
            },
            ButtonVm {
                action: CardAction::Explain,
                label: "Explain",
                disabled: snapshot.selected.is_none(),
            },
        ];
    }

    let button = if snapshot.outcome == Outcome::Correct {
        ButtonVm {
            action: CardAction::Continue,
            label: "Continue",
            disabled: false,
        }
    } else {
        ButtonVm {
            action: CardAction::TryAgain,
            label: "Try again",
            disabled: false,
        }
    };
    vec![button]
}

#[must_use]
pub fn map_lesson_card(demo: &DemoSession) -> LessonCardVm {
    let session = demo.session();
    let question = session.question();
    let state = session.state();
    let position = demo.position();

    let options = question
        .answers()
        .iter()
        .map(|answer| {
            let option_state = option_state(session, answer);
            let explanation = match option_state {
                OptionState::Correct | OptionState::Incorrect => {
                    answer.explanation().map(str::to_string)
                }
                OptionState::Idle | OptionState::Selected => None,
            };
            AnswerOptionVm {
                id: answer.id().clone(),
                text: answer.text().to_string(),
                state: option_state,
                explanation,
            }
        })
        .collect();

    let hint_button = ButtonVm {
        action: CardAction::ToggleHint,
        label: if state.hint_visible() {
            "Hide hint"
        } else {
            "Show hint"
        },
        disabled: state.is_resolved(),
    };

    LessonCardVm {
        position_label: format!(
            "Lesson {} of {}",
            position.lesson_number, position.lesson_count
        ),
        title: question.title().to_string(),
        time_estimate: question.time_estimate().to_string(),
        description: question.description().to_string(),
        prompt: question.prompt().to_string(),
        code: question.code().map(str::to_string),
        options,
        result: state.outcome(),
        hint: state.hint_visible().then(|| question.hint().to_string()),
        hint_button,
        actions: actions_for(session),
    }
}
