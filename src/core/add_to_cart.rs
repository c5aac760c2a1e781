//! Add-to-cart orchestration.
//!
//! [`AddToCartControl`] is the button's state machine:
//!
//! ```text
//! Idle ──press──▶ Pending ──complete(success)──▶ Added   (inline control)
//!   ▲                │                          ▶ Idle    (sticky bar)
//!   └────────────────┘ validation error / failure
//! ```
//!
//! `press` validates and hands out a [`Ticket`]; the caller runs the
//! external action and feeds the result to `complete`.  Splitting the call
//! lets the event loop keep running while the action is in flight, and the
//! Pending state is what rejects a second press on the same control.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::alert::{Alert, AlertKind, AlertSink};
use super::selection::VariantSelection;

// ───────────────────────────────────────── external action ───

/// Payload sent to the add-to-cart action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// What the action reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
}

impl ActionResult {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == AlertKind::Success
    }
}

/// The storefront's add-to-cart endpoint.  Not retried by callers.
#[async_trait]
pub trait AddToCartAction: Send + Sync {
    async fn add_to_cart(&self, request: AddToCartRequest) -> ActionResult;
}

// ───────────────────────────────────────── validation ────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select a color")]
    MissingColor,
    #[error("Select a size")]
    MissingSize,
}

/// Which halves of the variant the product needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariantRequirements {
    pub has_color: bool,
    pub has_size: bool,
}

/// Color is checked before size.
pub fn validate(
    requirements: VariantRequirements,
    selection: &VariantSelection,
) -> Result<(), ValidationError> {
    if requirements.has_color && selection.color.is_none() {
        return Err(ValidationError::MissingColor);
    }
    if requirements.has_size && selection.size.is_none() {
        return Err(ValidationError::MissingSize);
    }
    Ok(())
}

// ───────────────────────────────────────── control ───────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Idle,
    Pending,
    Added,
}

/// Which rendered control this is.  The two differ in how results become
/// alerts and in what success does to the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Page-body buttons: result kind passes through, success is terminal.
    Inline,
    /// Sticky bar: errors stay errors, everything else is neutral, success
    /// returns to Idle and the bar's membership flag takes over.
    StickyBar,
}

impl ControlKind {
    pub fn alert_kind(self, result: AlertKind) -> AlertKind {
        match self {
            ControlKind::Inline => result,
            ControlKind::StickyBar => match result {
                AlertKind::Error => AlertKind::Error,
                _ => AlertKind::Neutral,
            },
        }
    }

    fn after_success(self) -> ControlState {
        match self {
            ControlKind::Inline => ControlState::Added,
            ControlKind::StickyBar => ControlState::Idle,
        }
    }
}

/// An issued add-to-cart call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: u64,
    pub request: AddToCartRequest,
}

/// Result of pressing the button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Press {
    /// Validation passed, the control is Pending; run the ticket's request.
    Dispatched(Ticket),
    /// Missing selection; a neutral alert was shown.
    Rejected(ValidationError),
    /// The control is disabled (Pending or Added).
    Ignored,
}

/// How a completed call ended for the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Failed,
}

#[derive(Debug, Clone)]
pub struct AddToCartControl {
    kind: ControlKind,
    state: ControlState,
    last_token: u64,
}

impl AddToCartControl {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            state: ControlState::Idle,
            last_token: 0,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Whether the button accepts presses.
    pub fn is_enabled(&self) -> bool {
        self.state == ControlState::Idle
    }

    pub fn press(
        &mut self,
        product_id: &str,
        requirements: VariantRequirements,
        selection: &VariantSelection,
        sink: &mut dyn AlertSink,
    ) -> Press {
        if !self.is_enabled() {
            tracing::debug!(control = ?self.kind, state = ?self.state, "press ignored");
            return Press::Ignored;
        }

        if let Err(err) = validate(requirements, selection) {
            sink.show_alert(Alert::neutral(err.to_string()));
            return Press::Rejected(err);
        }

        self.last_token += 1;
        self.state = ControlState::Pending;
        tracing::debug!(control = ?self.kind, token = self.last_token, "add to cart dispatched");

        Press::Dispatched(Ticket {
            token: self.last_token,
            request: AddToCartRequest {
                product_id: product_id.to_owned(),
                color: selection.color.clone(),
                size: selection.size.clone(),
            },
        })
    }

    /// Apply an action result.  Results are applied in arrival order; a
    /// token older than the last issued one is logged but still applied.
    pub fn complete(&mut self, token: u64, result: ActionResult, sink: &mut dyn AlertSink) -> Outcome {
        if token != self.last_token {
            tracing::warn!(
                control = ?self.kind,
                token,
                latest = self.last_token,
                "applying out-of-date add-to-cart result"
            );
        }

        let kind = self.kind.alert_kind(result.kind);
        let success = result.is_success();
        sink.show_alert(Alert::new(result.message, kind));

        self.state = if success {
            self.kind.after_success()
        } else {
            ControlState::Idle
        };
        tracing::debug!(control = ?self.kind, state = ?self.state, "add to cart completed");

        if success {
            Outcome::Added
        } else {
            Outcome::Failed
        }
    }
}
