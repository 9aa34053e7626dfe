//! Widget components.
//!
//! Two embedding strategies share one container contract (a `div` whose
//! content is trusted widget markup): [`LiveWidget`] asks the client runtime
//! to synthesize markup on demand, while [`PrefetchedWidget`] looks markup up
//! in the provider's prefetched map. Both participate in DOM capture and in
//! the nested-placeholder upgrade protocol.

mod live;
mod prefetched;
mod upgrade;

pub use live::LiveWidget;
pub use prefetched::PrefetchedWidget;
pub use upgrade::find_unrendered_placeholder;
