//! Property-based tests using proptest
//!
//! These tests check header splitting and payload building against
//! randomized form contents.

use cmedit::editor::{join_header, split_header, CtypePolicy, FormState, HeaderRow};
use proptest::prelude::*;
use serde_json::json;

/// Header names never contain a colon; values may
fn arb_header_row() -> impl Strategy<Value = HeaderRow> {
    ("[A-Za-z-]{0,12}", "[ -~]{0,24}").prop_map(|(name, value)| HeaderRow::new(&name, &value))
}

fn arb_form() -> impl Strategy<Value = FormState> {
    (
        ".{0,40}",
        // Some("") is a content type the server sent empty
        prop::option::of(prop_oneof![Just(String::new()), "[a-z]+/[a-z]+"]),
        prop::option::of("[ -~]{0,30}"),
        any::<bool>(),
        prop::collection::vec(arb_header_row(), 0..10),
    )
        .prop_map(|(content, ctype, expires, incdate, headers)| {
            let mut form = FormState {
                path: "/p".to_string(),
                content,
                ctype_present: ctype.is_some(),
                ctype: ctype.unwrap_or_default(),
                incdate,
                headers,
                ..Default::default()
            };
            if let Some(expires) = expires {
                form.set_expires_checked(true);
                form.expires = expires;
            }
            form
        })
}

proptest! {
    /// Splitting undoes joining when the name has no colon
    #[test]
    fn split_undoes_join(row in arb_header_row()) {
        let (name, value) = split_header(&join_header(&row.name, &row.value));
        prop_assert_eq!(name, row.name);
        prop_assert_eq!(value, row.value);
    }

    /// Only rows with names are sent, in their display order
    #[test]
    fn payload_keeps_named_rows_in_order(rows in prop::collection::vec(arb_header_row(), 0..20)) {
        let mut form = FormState::default();
        for row in &rows {
            form.add_header_row();
            *form.headers.last_mut().unwrap() = row.clone();
        }

        let expected: Vec<String> = rows
            .iter()
            .filter(|row| !row.name.is_empty())
            .map(|row| format!("{}:{}", row.name, row.value))
            .collect();

        prop_assert_eq!(form.to_payload(CtypePolicy::Omit).headers, expected);
    }

    /// Saving a loaded form and loading the result gives the same form
    #[test]
    fn payload_reloads_to_same_form(form in arb_form()) {
        let mut named = form.clone();
        named.headers.retain(|row| !row.name.is_empty());

        let body = serde_json::to_string(&named.to_payload(CtypePolicy::Omit)).unwrap();
        let mut reloaded = FormState { path: named.path.clone(), ..Default::default() };
        reloaded.apply_response(&body).unwrap();

        prop_assert_eq!(reloaded, named);
    }

    /// Optional keys are present exactly when their control is set
    #[test]
    fn optional_keys_follow_controls(form in arb_form()) {
        let value = serde_json::to_value(form.to_payload(CtypePolicy::Omit)).unwrap();
        let object = value.as_object().unwrap();

        prop_assert_eq!(
            object.contains_key("ctype"),
            form.ctype_present || !form.ctype.is_empty()
        );
        prop_assert_eq!(object.contains_key("expires"), form.expires_checked);
        prop_assert_eq!(object.contains_key("incdate"), form.incdate);
        prop_assert!(object.contains_key("headers"));
        if form.incdate {
            prop_assert_eq!(&object["incdate"], &json!(true));
        }
    }

    /// Raw header strings come back unchanged after a load and save,
    /// with or without a colon
    #[test]
    fn loaded_headers_save_verbatim(
        raw in prop::collection::vec(
            prop_oneof!["[A-Za-z-]{1,12}", "[A-Za-z-]{1,12}:[ -~]{0,24}"],
            0..10,
        )
    ) {
        let mut form = FormState::default();
        form.apply_response(&json!({"content": "", "headers": raw}).to_string()).unwrap();
        prop_assert_eq!(form.to_payload(CtypePolicy::Omit).headers, raw);
    }

    /// Toggling the expiry control twice is a no-op on visibility
    #[test]
    fn expiry_toggle_pair_is_identity(form in arb_form()) {
        let mut toggled = form.clone();
        let checked = toggled.expires_checked;
        toggled.set_expires_checked(!checked);
        toggled.set_expires_checked(checked);
        prop_assert_eq!(toggled.expires_visible, form.expires_visible);
    }
}
