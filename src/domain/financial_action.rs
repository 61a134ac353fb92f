use serde::Serialize;

use super::{DocumentKind, PaymentStatus};

/// Every UI action the lifecycle can expose for a Job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialActionKind {
    ViewEstimate,
    EditEstimate,
    AssociateNewEstimate,
    ViewAgreement,
    EditAgreement,
    AssociateNewAgreement,
    EditInvoice,
    AssociateNewInvoice,
    CreateAssociatedInvoice,
    CreateAssociatedEstimate,
    Pay,
}

impl FinancialActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            FinancialActionKind::ViewEstimate => "View Estimate",
            FinancialActionKind::EditEstimate => "Edit Estimate",
            FinancialActionKind::AssociateNewEstimate => "Associate New Estimate",
            FinancialActionKind::ViewAgreement => "View Agreement",
            FinancialActionKind::EditAgreement => "Edit Agreement",
            FinancialActionKind::AssociateNewAgreement => "Associate New Agreement",
            FinancialActionKind::EditInvoice => "Edit Invoice",
            FinancialActionKind::AssociateNewInvoice => "Associate New Invoice",
            FinancialActionKind::CreateAssociatedInvoice => "Create Associated Invoice",
            FinancialActionKind::CreateAssociatedEstimate => "Create Associated Estimate",
            FinancialActionKind::Pay => "Pay",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FinancialActionKind::ViewEstimate | FinancialActionKind::ViewAgreement => "eye",
            FinancialActionKind::EditEstimate
            | FinancialActionKind::EditAgreement
            | FinancialActionKind::EditInvoice => "pencil",
            FinancialActionKind::AssociateNewEstimate
            | FinancialActionKind::AssociateNewAgreement
            | FinancialActionKind::AssociateNewInvoice => "link",
            FinancialActionKind::CreateAssociatedInvoice
            | FinancialActionKind::CreateAssociatedEstimate => "file-plus",
            FinancialActionKind::Pay => "credit-card",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinancialAction {
    pub kind: FinancialActionKind,
    pub label: &'static str,
    pub icon: &'static str,
    /// The visually primary action (the Pay button).
    pub primary: bool,
}

impl FinancialAction {
    fn new(kind: FinancialActionKind) -> Self {
        Self {
            kind,
            label: kind.label(),
            icon: kind.icon(),
            primary: false,
        }
    }
}

/// Which actions the caller can actually service. The reference UI passed
/// callbacks; an action is only emitted when its handler is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerSet {
    pub view_estimate: bool,
    pub edit_estimate: bool,
    pub associate_estimate: bool,
    pub view_agreement: bool,
    pub edit_agreement: bool,
    pub associate_agreement: bool,
    pub edit_invoice: bool,
    pub associate_invoice: bool,
    pub create_invoice: bool,
    pub create_estimate: bool,
    pub pay: bool,
}

impl HandlerSet {
    pub fn all() -> Self {
        Self {
            view_estimate: true,
            edit_estimate: true,
            associate_estimate: true,
            view_agreement: true,
            edit_agreement: true,
            associate_agreement: true,
            edit_invoice: true,
            associate_invoice: true,
            create_invoice: true,
            create_estimate: true,
            pay: true,
        }
    }
}

fn push(actions: &mut Vec<FinancialAction>, action: FinancialAction) {
    if !actions.iter().any(|a| a.kind == action.kind) {
        actions.push(action);
    }
}

/// The decision table governing the document-to-job lifecycle UI.
///
/// For each source kind, Edit X (while unpaid) and Associate New X (once
/// paid) are mutually exclusive; the Pay action is appended last for any
/// not-yet-paid Job.
pub fn financial_actions(
    source: Option<DocumentKind>,
    payment_status: PaymentStatus,
    handlers: &HandlerSet,
) -> Vec<FinancialAction> {
    let paid = payment_status == PaymentStatus::Paid;
    let mut actions = Vec::new();

    match source {
        Some(DocumentKind::Estimate) => {
            if handlers.view_estimate {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::ViewEstimate),
                );
            }
            if paid {
                if handlers.associate_estimate {
                    push(
                        &mut actions,
                        FinancialAction::new(FinancialActionKind::AssociateNewEstimate),
                    );
                }
            } else if handlers.edit_estimate {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::EditEstimate),
                );
            }
            if paid {
                if handlers.associate_invoice {
                    push(
                        &mut actions,
                        FinancialAction::new(FinancialActionKind::AssociateNewInvoice),
                    );
                }
            } else if handlers.create_invoice {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::CreateAssociatedInvoice),
                );
            }
        }
        Some(DocumentKind::Invoice) => {
            if paid {
                if handlers.associate_invoice {
                    push(
                        &mut actions,
                        FinancialAction::new(FinancialActionKind::AssociateNewInvoice),
                    );
                }
            } else if handlers.edit_invoice {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::EditInvoice),
                );
            }
        }
        Some(DocumentKind::Agreement) => {
            if handlers.view_agreement {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::ViewAgreement),
                );
            }
            if paid {
                if handlers.associate_agreement {
                    push(
                        &mut actions,
                        FinancialAction::new(FinancialActionKind::AssociateNewAgreement),
                    );
                }
            } else if handlers.edit_agreement {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::EditAgreement),
                );
            }
            if paid {
                if handlers.associate_invoice {
                    push(
                        &mut actions,
                        FinancialAction::new(FinancialActionKind::AssociateNewInvoice),
                    );
                }
            } else if handlers.create_invoice {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::CreateAssociatedInvoice),
                );
            }
        }
        None => {
            if handlers.create_invoice {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::CreateAssociatedInvoice),
                );
            }
            if handlers.create_estimate {
                push(
                    &mut actions,
                    FinancialAction::new(FinancialActionKind::CreateAssociatedEstimate),
                );
            }
        }
    }

    if !paid && handlers.pay {
        push(
            &mut actions,
            FinancialAction {
                kind: FinancialActionKind::Pay,
                label: if payment_status == PaymentStatus::Partial {
                    "Complete Payment"
                } else {
                    "Pay"
                },
                icon: FinancialActionKind::Pay.icon(),
                primary: true,
            },
        );
    }

    actions
}
