use fieldline::domain::{
    financial_actions, DocumentKind, FinancialAction, FinancialActionKind, HandlerSet,
    PaymentStatus,
};

fn kinds(actions: &[FinancialAction]) -> Vec<FinancialActionKind> {
    actions.iter().map(|a| a.kind).collect()
}

#[test]
fn given_unpaid_estimate_job_when_resolving_then_edit_and_create_paths_offered() {
    let actions = financial_actions(
        Some(DocumentKind::Estimate),
        PaymentStatus::Unpaid,
        &HandlerSet::all(),
    );
    assert_eq!(
        kinds(&actions),
        vec![
            FinancialActionKind::ViewEstimate,
            FinancialActionKind::EditEstimate,
            FinancialActionKind::CreateAssociatedInvoice,
            FinancialActionKind::Pay,
        ]
    );
}

#[test]
fn given_paid_estimate_job_when_resolving_then_associate_paths_replace_edit() {
    let actions = financial_actions(
        Some(DocumentKind::Estimate),
        PaymentStatus::Paid,
        &HandlerSet::all(),
    );
    assert_eq!(
        kinds(&actions),
        vec![
            FinancialActionKind::ViewEstimate,
            FinancialActionKind::AssociateNewEstimate,
            FinancialActionKind::AssociateNewInvoice,
        ]
    );
}

#[test]
fn given_invoice_job_when_resolving_then_exactly_one_invoice_action() {
    let unpaid = financial_actions(
        Some(DocumentKind::Invoice),
        PaymentStatus::Unpaid,
        &HandlerSet::all(),
    );
    assert_eq!(
        kinds(&unpaid),
        vec![FinancialActionKind::EditInvoice, FinancialActionKind::Pay]
    );

    let paid = financial_actions(
        Some(DocumentKind::Invoice),
        PaymentStatus::Paid,
        &HandlerSet::all(),
    );
    assert_eq!(kinds(&paid), vec![FinancialActionKind::AssociateNewInvoice]);
}

#[test]
fn given_agreement_job_when_resolving_then_view_leads_and_pairs_split_on_payment() {
    let unpaid = financial_actions(
        Some(DocumentKind::Agreement),
        PaymentStatus::Unpaid,
        &HandlerSet::all(),
    );
    assert_eq!(
        kinds(&unpaid),
        vec![
            FinancialActionKind::ViewAgreement,
            FinancialActionKind::EditAgreement,
            FinancialActionKind::CreateAssociatedInvoice,
            FinancialActionKind::Pay,
        ]
    );

    let paid = financial_actions(
        Some(DocumentKind::Agreement),
        PaymentStatus::Paid,
        &HandlerSet::all(),
    );
    assert_eq!(
        kinds(&paid),
        vec![
            FinancialActionKind::ViewAgreement,
            FinancialActionKind::AssociateNewAgreement,
            FinancialActionKind::AssociateNewInvoice,
        ]
    );
}

#[test]
fn given_sourceless_job_when_resolving_then_both_create_actions_offered() {
    let actions = financial_actions(None, PaymentStatus::Unpaid, &HandlerSet::all());
    assert_eq!(
        kinds(&actions),
        vec![
            FinancialActionKind::CreateAssociatedInvoice,
            FinancialActionKind::CreateAssociatedEstimate,
            FinancialActionKind::Pay,
        ]
    );
}

#[test]
fn given_partial_payment_when_resolving_then_pay_action_relabeled() {
    let actions = financial_actions(
        Some(DocumentKind::Invoice),
        PaymentStatus::Partial,
        &HandlerSet::all(),
    );
    let pay = actions
        .iter()
        .find(|a| a.kind == FinancialActionKind::Pay)
        .expect("pay action present");
    assert_eq!(pay.label, "Complete Payment");
    assert!(pay.primary);

    let unpaid = financial_actions(
        Some(DocumentKind::Invoice),
        PaymentStatus::Unpaid,
        &HandlerSet::all(),
    );
    let pay = unpaid
        .iter()
        .find(|a| a.kind == FinancialActionKind::Pay)
        .expect("pay action present");
    assert_eq!(pay.label, "Pay");
}

#[test]
fn given_any_combination_when_resolving_then_edit_and_associate_never_coexist() {
    let exclusive_pairs = [
        (
            FinancialActionKind::EditEstimate,
            FinancialActionKind::AssociateNewEstimate,
        ),
        (
            FinancialActionKind::EditInvoice,
            FinancialActionKind::AssociateNewInvoice,
        ),
        (
            FinancialActionKind::EditAgreement,
            FinancialActionKind::AssociateNewAgreement,
        ),
    ];

    let sources = [
        None,
        Some(DocumentKind::Invoice),
        Some(DocumentKind::Estimate),
        Some(DocumentKind::Agreement),
    ];
    let statuses = [
        PaymentStatus::Paid,
        PaymentStatus::Unpaid,
        PaymentStatus::Partial,
    ];

    for source in sources {
        for status in statuses {
            let actions = financial_actions(source, status, &HandlerSet::all());
            let kinds = kinds(&actions);

            for (edit, associate) in exclusive_pairs {
                assert!(
                    !(kinds.contains(&edit) && kinds.contains(&associate)),
                    "{:?}/{:?} returned both {:?} and {:?}",
                    source,
                    status,
                    edit,
                    associate
                );
            }

            let mut deduped = kinds.clone();
            deduped.dedup();
            assert_eq!(kinds, deduped, "duplicate actions for {:?}/{:?}", source, status);

            assert_eq!(
                kinds.contains(&FinancialActionKind::Pay),
                status != PaymentStatus::Paid,
                "pay action mismatch for {:?}/{:?}",
                source,
                status
            );
        }
    }
}

#[test]
fn given_missing_handlers_when_resolving_then_actions_filtered_out() {
    let none = financial_actions(
        Some(DocumentKind::Estimate),
        PaymentStatus::Unpaid,
        &HandlerSet::default(),
    );
    assert!(none.is_empty());

    let pay_only = HandlerSet {
        pay: true,
        ..HandlerSet::default()
    };
    let actions = financial_actions(Some(DocumentKind::Estimate), PaymentStatus::Unpaid, &pay_only);
    assert_eq!(kinds(&actions), vec![FinancialActionKind::Pay]);
}

#[test]
fn given_resolved_actions_when_inspecting_then_labels_and_icons_bound() {
    let actions = financial_actions(
        Some(DocumentKind::Estimate),
        PaymentStatus::Unpaid,
        &HandlerSet::all(),
    );
    for action in &actions {
        assert!(!action.label.is_empty());
        assert!(!action.icon.is_empty());
    }
    assert_eq!(actions[0].label, "View Estimate");
    assert_eq!(actions[0].icon, "eye");
}
