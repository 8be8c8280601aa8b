//! Reusable UI components for the dashboard TUI.

mod quota_card;

pub use quota_card::{
    QuotaCardComponent, QuotaCardViewContext, display_title, resource_description,
};
