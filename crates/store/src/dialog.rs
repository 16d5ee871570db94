//! Create/edit dialog state machine.
//!
//! One tagged value per dialog instead of a cluster of booleans:
//! `Closed -> Open -> Submitting -> (Closed on success | Open-with-error on
//! failure)`. Validation failures keep the dialog open without ever leaving
//! `Open`.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DialogState<F> {
    #[default]
    Closed,
    Open {
        form: F,
        error: Option<String>,
    },
    Submitting {
        form: F,
    },
}

impl<F: Clone> DialogState<F> {
    pub fn open(&mut self, form: F) {
        *self = Self::Open { form, error: None };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub fn form(&self) -> Option<&F> {
        match self {
            Self::Closed => None,
            Self::Open { form, .. } | Self::Submitting { form } => Some(form),
        }
    }

    /// Mutable access while the dialog is open; editing is not possible
    /// while a submit is in flight.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            Self::Open { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Move `Open -> Submitting`, handing back the form to submit. Returns
    /// `None` when there is nothing to submit.
    pub fn begin_submit(&mut self) -> Option<F> {
        match self {
            Self::Open { form, .. } => {
                let form = form.clone();
                *self = Self::Submitting { form: form.clone() };
                Some(form)
            }
            _ => None,
        }
    }

    /// Settle an in-flight submit: close on success, re-open with the error
    /// message on failure. The form survives a failure so the user can fix
    /// and retry.
    pub fn resolve(&mut self, result: Result<(), String>) {
        let Self::Submitting { form } = self else {
            return;
        };
        match result {
            Ok(()) => *self = Self::Closed,
            Err(message) => {
                *self = Self::Open {
                    form: form.clone(),
                    error: Some(message),
                }
            }
        }
    }

    /// Surface a validation message without leaving `Open`. No remote call
    /// was issued.
    pub fn reject(&mut self, message: String) {
        if let Self::Open { error, .. } = self {
            *error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_submit_reopens_with_error_and_form() {
        let mut dialog: DialogState<String> = DialogState::Closed;
        dialog.open("Linear algebra".to_string());

        let form = dialog.begin_submit();
        assert_eq!(form.as_deref(), Some("Linear algebra"));
        assert!(dialog.is_submitting());

        dialog.resolve(Err("Failed to add resource".to_string()));
        assert!(dialog.is_open());
        assert_eq!(dialog.form().map(String::as_str), Some("Linear algebra"));
        assert_eq!(dialog.error(), Some("Failed to add resource"));
    }

    #[test]
    fn successful_submit_closes() {
        let mut dialog: DialogState<String> = DialogState::Closed;
        dialog.open("Linear algebra".to_string());
        dialog.begin_submit();
        dialog.resolve(Ok(()));
        assert_eq!(dialog, DialogState::Closed);
    }

    #[test]
    fn reject_keeps_dialog_open_without_submitting() {
        let mut dialog: DialogState<String> = DialogState::Closed;
        dialog.open(String::new());
        dialog.reject("Title is required".to_string());
        assert!(dialog.is_open());
        assert!(!dialog.is_submitting());
        assert_eq!(dialog.error(), Some("Title is required"));
    }
}
