//! Integration tests driving the full router through `tower::oneshot`.

mod helpers;

mod assets_test;
mod events_test;
mod messages_test;
mod storage_test;
mod users_test;
