use std::time::Duration;

use dioxus::prelude::*;

use course_core::model::Question;
use services::QuizPhase;

use crate::vm::{QuizIntent, QuizOutcome, QuizVm, REVEAL_DELAY_MS, option_style};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// One question at a time over shuffled options. A pick submits
/// immediately; the outcome stays on screen for the reveal delay, then the
/// run advances on its own. `on_passed` fires exactly once per run, when
/// every question in it was answered correctly.
#[component]
pub(super) fn QuizPanel(questions: Vec<Question>, on_passed: EventHandler<()>) -> Element {
    let bank = questions.clone();
    let mut vm = use_signal(move || QuizVm::new(questions).ok());
    let mut notice = use_signal(|| None::<String>);

    let dispatch = use_callback(move |intent: QuizIntent| match intent {
        QuizIntent::Select(index) => {
            let picked = vm
                .with_mut(|state| state.as_mut().map(|active| active.select(index)))
                .and_then(Result::ok);
            if picked.is_some() {
                notice.set(None);
                spawn(async move {
                    tokio::time::sleep(Duration::from_millis(REVEAL_DELAY_MS)).await;
                    advance_run(vm, notice, on_passed);
                });
            }
        }
        QuizIntent::Advance => advance_run(vm, notice, on_passed),
        QuizIntent::Restart => {
            vm.set(QuizVm::new(bank.clone()).ok());
            notice.set(None);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let state = vm.read();
    let Some(run) = state.as_ref() else {
        return rsx! {};
    };

    let phase = run.phase();
    let number = run.current_index() + 1;
    let total = run.total();
    let prompt = run.prompt();
    let passed = run.is_passed();
    let revealed = matches!(phase, QuizPhase::Revealed { .. });
    let notice_text = notice.read().clone();

    let options = run.options().iter().enumerate().map(|(index, option)| {
        let style = option_style(phase, option, index);
        rsx! {
            button {
                class: "{style.class()}",
                key: "{option.text}",
                disabled: revealed,
                onclick: move |_| dispatch.call(QuizIntent::Select(index)),
                "{option.text}"
            }
        }
    });

    let feedback = match phase {
        QuizPhase::Answering => None,
        QuizPhase::Revealed { correct: true, .. } => {
            Some(("quiz-feedback quiz-feedback--correct", "Correct!"))
        }
        QuizPhase::Revealed { correct: false, .. } => {
            Some(("quiz-feedback quiz-feedback--incorrect", "Not quite."))
        }
    };

    rsx! {
        div { class: "quiz-panel",
            h3 { class: "quiz-heading", "Check your understanding" }
            if let Some(text) = notice_text {
                p { class: "quiz-notice", "{text}" }
            }
            p { class: "quiz-progress", "Question {number} of {total}" }
            p { class: "quiz-prompt", "{prompt}" }
            div { class: "quiz-options", {options} }
            if let Some((feedback_class, label)) = feedback {
                p { class: "{feedback_class}", "{label}" }
            }
            if passed {
                // The section normally flips to completed and unmounts this
                // panel before the passed state ever renders; reaching it
                // means the completion write failed upstream.
                button {
                    class: "btn",
                    onclick: move |_| dispatch.call(QuizIntent::Restart),
                    "Take the quiz again"
                }
            }
        }
    }
}

/// Applies the post-reveal transition. Reached from the reveal timer and,
/// in tests, straight through the dispatch handle; a run that is not in
/// the revealed phase ignores the call, which also keeps a stale timer
/// harmless.
fn advance_run(
    mut vm: Signal<Option<QuizVm>>,
    mut notice: Signal<Option<String>>,
    on_passed: EventHandler<()>,
) {
    let outcome = vm.with_mut(|state| {
        let active = state.as_mut()?;
        if !matches!(active.phase(), QuizPhase::Revealed { .. }) {
            return None;
        }
        active.advance().ok()
    });

    match outcome {
        Some(QuizOutcome::Passed) => on_passed.call(()),
        Some(QuizOutcome::Restarted { score, total }) => {
            notice.set(Some(format!(
                "You scored {score} of {total}. A perfect score unlocks the next section; try again."
            )));
        }
        Some(QuizOutcome::Continue) | None => {}
    }
}

/// Hooks the smoke tests use to reach the panel from outside the tree:
/// the intent dispatcher and the run signal.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
