use crate::{
    AppState, Effect, Msg, Notification, SubmissionOrigin, SubmissionSource, SubmitRejection,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldEdited { field, value } => {
            if state.form.set_field(field, value) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FormSubmitted => {
            let source = SubmissionSource::Record(state.form.record().clone());
            match state.submission.submit(source) {
                Ok(payload) => {
                    state.form.lock();
                    state.mark_dirty();
                    vec![Effect::UploadPayload {
                        payload,
                        origin: SubmissionOrigin::Form,
                    }]
                }
                Err(rejection) => vec![rejected(rejection)],
            }
        }
        Msg::FileSelected(file) => match state.submission.submit(SubmissionSource::File(file)) {
            Ok(payload) => {
                state.mark_dirty();
                vec![Effect::UploadPayload {
                    payload,
                    origin: SubmissionOrigin::File,
                }]
            }
            Err(rejection) => vec![rejected(rejection)],
        },
        Msg::SubmissionFinished(outcome) => match state.submission.finish(outcome) {
            Some((origin, result)) => {
                if origin == SubmissionOrigin::Form {
                    state.form.reset();
                }
                state.form.unlock();
                state.mark_dirty();
                vec![Effect::Notify(Notification::from(result))]
            }
            None => Vec::new(),
        },
        Msg::QueryEdited(text) => {
            state.query.set_text(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchSubmitted => match state.query.search_current() {
            Ok(text) => {
                state.mark_dirty();
                vec![Effect::RunQuery { text }]
            }
            Err(_) => Vec::new(),
        },
        Msg::SearchFinished(outcome) => {
            state.query.finish(outcome);
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}

fn rejected(rejection: SubmitRejection) -> Effect {
    Effect::Notify(Notification::error(rejection.to_string()))
}
