//! Procedural macros for Dynamix.
//!
//! - `#[derive(Action)]` - Derive macro implementing `dynamix::Action` for enums

use proc_macro::TokenStream;

mod action;

/// Derive macro for implementing the `Action` trait on an enum.
///
/// Each variant's action type is its name, unless overridden with
/// `#[action(rename = "...")]`. A single-field tuple variant holding an
/// `Announcement` can be marked `#[action(announcement)]`: its action type is
/// the announcement's, and `From<Announcement>` is generated for the enum.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Action)]
/// enum CounterAction {
///     #[action(rename = "INC")]
///     Increment,
///     Reset { to: i64 },
///     #[action(announcement)]
///     Dynamix(Announcement),
/// }
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    action::derive_action_impl(input)
}
