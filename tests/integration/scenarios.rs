//! End-to-end scenarios through the public API.

use expected::{Outcome, Task, TaskState, EERROR, EVOID};

fn return_task(value: i32) -> Task<i32, bool> {
    Task::new(move |_cx| async move {
        if value > 0 {
            Outcome::Ok(value)
        } else {
            Outcome::Err(false)
        }
    })
}

fn return_task2(value: i32) -> Task<i32, i32> {
    Task::new(move |_cx| async move {
        if value > 0 {
            Outcome::Ok(value)
        } else {
            (EERROR | -value).into()
        }
    })
}

#[test]
fn return_test_succeeded() {
    let r = return_task(100).run();
    assert!(r.value().is_some());
    assert_eq!(*r.value().unwrap(), 100);
}

#[test]
fn return_test_failed() {
    let r = return_task(-100).run();
    assert!(r.error().is_some());
    assert!(!*r.error().unwrap());
    assert!(!r.trace().is_empty());
}

#[test]
fn return_test2_succeeded() {
    let r = return_task2(100).run();
    assert_eq!(r.value(), Some(&100));
}

#[test]
fn return_test2_failed() {
    let r = return_task2(-100).run();
    assert_eq!(r.error(), Some(&100));
    assert_eq!(r.value(), None);
}

#[derive(Debug, PartialEq)]
enum ConfigFault {
    NotFound,
    Invalid(String),
}

fn read_setting(name: &'static str) -> Task<String, ConfigFault> {
    Task::new(move |_cx| async move {
        match name {
            "port" => Outcome::Ok("8080".to_string()),
            "host" => Outcome::Ok("localhost".to_string()),
            "timeout" => Outcome::Ok("soon".to_string()),
            _ => Outcome::Err(ConfigFault::NotFound),
        }
    })
}

fn parse_number(name: &'static str) -> Task<u16, ConfigFault> {
    Task::new(move |cx| async move {
        let raw = cx.wait(read_setting(name)).await;
        Outcome::from(raw.parse::<u16>().map_err(|_| ConfigFault::Invalid(raw.clone())))
    })
}

fn endpoint() -> Task<String, ConfigFault> {
    Task::new(|cx| async move {
        let host = cx.wait(read_setting("host")).await;
        let port = cx.wait(parse_number("port")).await;
        Outcome::Ok(format!("{}:{}", host, port))
    })
}

#[test]
fn composed_tasks_succeed() {
    let r = endpoint().run();
    assert_eq!(r.value().map(String::as_str), Some("localhost:8080"));
}

#[test]
fn composed_tasks_surface_inner_error() {
    assert_eq!(
        parse_number("timeout").run().error(),
        Some(&ConfigFault::Invalid("soon".to_string()))
    );
    assert_eq!(
        parse_number("retries").run().error(),
        Some(&ConfigFault::NotFound)
    );
}

#[test]
fn void_task_reports_success_flag() {
    let task: Task<(), ConfigFault> = Task::new(|cx| async move {
        cx.wait(read_setting("port")).await;
        EVOID.into()
    });
    let r = task.run();
    assert!(r.succeeded());
    assert!(r.error().is_none());
}

#[test]
fn moved_task_leaves_empty_source() {
    let mut source = return_task(3);
    let target = std::mem::take(&mut source);
    assert_eq!(source.state(), TaskState::Empty);
    assert_eq!(target.run().value(), Some(&3));
}
