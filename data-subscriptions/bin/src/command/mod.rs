mod notify;

pub use self::notify::{run_notify, run_notify_non_subscribable};
