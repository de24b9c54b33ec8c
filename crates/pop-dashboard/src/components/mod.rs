//! Dashboard UI components
//!
//! Layered the same way throughout:
//!
//! 1. **Primitives** (`primitives.rs`) - skeletons, empty/error states,
//!    badges, pagination, modals, field errors.
//! 2. **Icons** (`icons.rs`) - inline SVG icons, no external assets.
//! 3. **Layout** (`sidebar.rs`, `guard.rs`) - navigation and the
//!    protected shell.
//!
//! Page-level views live in `crate::pages`, one module per entity.

pub mod guard;
pub mod icons;
pub mod primitives;
pub mod report_modals;
pub mod sidebar;

pub use guard::ProtectedShell;
pub use primitives::{
    EmptyState, FieldErrorText, LoadingSpinner, Modal, NoRecordsModal, PaginationBar, RetryNotice,
    StatusBadge, SubmitButton, TableSkeleton,
};
pub use report_modals::{DateRangeModal, StockRangeModal};
