// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod key_value_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod budget_model;
        pub(crate) mod checklist_item_model;
        pub(crate) mod collection_model;
        pub(crate) mod lenient_value_model;
        pub(crate) mod reminder_model;
        pub(crate) mod saved_list_model;
        pub(crate) mod shopping_item_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod session_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod budget;
        pub(crate) mod budget_overview;
        pub(crate) mod category;
        pub(crate) mod checklist_item;
        pub(crate) mod item_id;
        pub(crate) mod purchase_summary;
        pub(crate) mod reminder;
        pub(crate) mod saved_list;
        pub(crate) mod session_state;
        pub(crate) mod shopping_item;
    }
    pub(crate) mod logic {
        pub(crate) mod metrics;
        pub(crate) mod summary_processor;
        pub(crate) mod transitions;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod session_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod export_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod csv_summary_printer;
    pub(crate) mod receipt_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::budget::*;
        pub use crate::domain::entities::budget_overview::*;
        pub use crate::domain::entities::category::*;
        pub use crate::domain::entities::checklist_item::*;
        pub use crate::domain::entities::item_id::*;
        pub use crate::domain::entities::purchase_summary::*;
        pub use crate::domain::entities::reminder::*;
        pub use crate::domain::entities::saved_list::*;
        pub use crate::domain::entities::session_state::*;
        pub use crate::domain::entities::shopping_item::*;
    }

    pub mod storage {
        pub use crate::data::datasources::key_value_datasource::*;
        pub use crate::data::repositories::session_repository_impl::*;
        pub use crate::domain::repositories::session_repository::*;
    }

    pub mod export {
        pub use crate::domain::usecases::export_usecase::{ExportUsecase, ExportedFiles};
        pub use crate::presentation::receipt_printer::{
            Align, ReceiptDocument, ReceiptElement, ReceiptPage, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
        };
    }
}
