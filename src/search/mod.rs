mod reconciler;

pub use reconciler::{SearchReconciler, SearchTicket, SortOrder, Transition, ViewMode};
