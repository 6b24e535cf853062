//! The event loop feeding effect results back into the controller.

use std::sync::Arc;
use std::time::Duration;

use postboard_core::domain::{FormInput, FormKind, ViewKind};
use postboard_core::{Command, ControllerConfig, PostStore, ViewController};
use postboard_infra::{EventLoop, FsImageReader, HeadlessSurface, InMemoryStorage};

fn controller() -> ViewController<HeadlessSurface> {
    let config = ControllerConfig {
        toast_duration: Duration::from_millis(10),
        ..ControllerConfig::default()
    };
    ViewController::new(
        PostStore::new(Arc::new(InMemoryStorage::new())),
        HeadlessSurface::new(),
        config,
    )
}

#[tokio::test]
async fn test_image_reads_come_back_as_previews() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dot.png"), [0x89, b'P', b'N', b'G']).unwrap();
    let reader = FsImageReader::with_root(dir.path());
    let file = reader.describe("dot.png").await.unwrap();

    let (mut event_loop, sender) = EventLoop::new(controller(), Arc::new(reader));
    event_loop.start();

    sender
        .send(Command::Navigate {
            view: ViewKind::Add,
            post_id: None,
        })
        .unwrap();
    sender
        .send(Command::SelectImage {
            form: FormKind::Add,
            file,
        })
        .unwrap();
    drop(sender);

    let mut seen = Vec::new();
    let controller = event_loop.run(|name, _| seen.push(name)).await;

    assert_eq!(seen, ["navigate", "select_image", "image_loaded"]);
    let preview = controller.draft(FormKind::Add).preview.as_ref().unwrap();
    assert_eq!(preview.src, "data:image/png;base64,iVBORw==");
    assert_eq!(preview.caption, "dot.png");
}

#[tokio::test]
async fn test_toasts_are_dismissed_before_the_loop_ends() {
    let (mut event_loop, sender) =
        EventLoop::new(controller(), Arc::new(FsImageReader::new()));
    event_loop.start();

    sender
        .send(Command::SubmitAdd {
            input: FormInput {
                title: "Timed".to_string(),
                description: "Toast goes away".to_string(),
                date: "2025-10-06".to_string(),
            },
        })
        .unwrap();
    drop(sender);

    let controller = event_loop.run(|_, _| {}).await;

    assert_eq!(controller.store().len(), 4);
    assert!(controller.current_toast().is_none());
    assert!(controller.surface().toast().is_none());
}

#[tokio::test]
async fn test_unreadable_image_reports_failure() {
    let (mut event_loop, sender) =
        EventLoop::new(controller(), Arc::new(FsImageReader::new()));
    event_loop.start();

    sender
        .send(Command::SelectImage {
            form: FormKind::Edit,
            file: postboard_core::domain::ImageFile {
                name: "missing.png".to_string(),
                mime_type: "image/png".to_string(),
                size: 10,
                handle: "/no/such/dir/missing.png".to_string(),
            },
        })
        .unwrap();
    drop(sender);

    let mut seen = Vec::new();
    let controller = event_loop
        .run(|name, controller| {
            if let Some(toast) = controller.current_toast() {
                seen.push(toast.message.clone());
            }
        })
        .await;

    assert_eq!(seen, ["Could not read image file"]);
    assert!(controller.draft(FormKind::Edit).preview.is_none());
}
