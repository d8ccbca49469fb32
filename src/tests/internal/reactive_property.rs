use std::time::Duration;

use crate::states::unlock_reactive::{UnlockReactiveProperty, UnlockReactivePropertyError};

#[test]
fn update_replaces_current_value() {
    let property = UnlockReactiveProperty::new(1u64);
    assert_eq!(property.get_current(), Some(1));

    property.update(2).unwrap().update(3).unwrap();
    assert_eq!(property.get_current(), Some(3));
}

#[test]
fn clones_share_the_same_value() {
    let writer = UnlockReactiveProperty::new(String::from("idle"));
    let reader = writer.clone();

    writer.update("downloading".to_string()).unwrap();
    assert_eq!(reader.get_or_default(), "downloading");
}

#[tokio::test]
async fn watcher_receives_latest_value() {
    let property = UnlockReactiveProperty::new(0u32);
    let mut watcher = property.watch();
    assert_eq!(watcher.borrow(), Some(0));

    let writer = property.clone();
    tokio::spawn(async move {
        writer.update(7).unwrap();
    });

    let value = tokio::time::timeout(Duration::from_secs(1), watcher.changed())
        .await
        .expect("no change observed")
        .unwrap();
    assert_eq!(value, 7);
}

#[tokio::test]
async fn watcher_closes_when_all_handles_drop() {
    let property = UnlockReactiveProperty::new(0u32);
    let mut watcher = property.watch();

    drop(property);

    let result = tokio::time::timeout(Duration::from_secs(1), watcher.changed())
        .await
        .expect("watcher did not close");
    assert!(matches!(
        result,
        Err(UnlockReactivePropertyError::WatcherClosed | UnlockReactivePropertyError::RecvError(_))
    ));
}
