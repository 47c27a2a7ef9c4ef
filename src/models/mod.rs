pub mod summary;
pub mod transaction;
pub mod view_state;

pub use summary::{KpiSummary, MethodCount, MethodDistribution, VolumeBucket, DAY_LABEL_FORMAT};
pub use transaction::{
    parse_timestamp, AlternativeMethod, PaymentMethod, PaymentSchema, Transaction,
    TransactionStatus,
};
pub use view_state::{SortKey, ViewPage, ViewState, DEFAULT_PAGE_SIZE};
