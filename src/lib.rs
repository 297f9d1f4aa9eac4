// Базовые модули
pub mod config;
pub mod metrics;
pub mod query;

// Адаптер page -> after-token и его состояние
pub mod adapter;
pub mod state;

// Один адаптер на элемент страницы
pub mod mount;

// CLI (используется бинарником forage-pager и тестами)
pub mod cli;

// Удобные реэкспорты
pub use adapter::{next_token, page_or_first, PageTokenAdapter, PageTokens};
pub use config::WidgetConfig;
pub use mount::{mount, HostElement, WidgetSet};
pub use query::{Query, AFTER_PARAM};
