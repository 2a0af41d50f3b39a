//! Driver configuration and contract violations.

use expected::{Outcome, RunConfig, RunError, Task, TaskBuilder};

#[test]
fn config_from_json_drives_builder() {
    let config =
        RunConfig::from_json_str(r#"{ "default_task_name": "job", "capture_traces": false }"#)
            .unwrap();
    let task: Task<i32, &str> = TaskBuilder::new()
        .config(config)
        .spawn(|_cx| async move { Outcome::Err("bad") });
    assert_eq!(task.name(), "job");

    let r = task.run();
    assert_eq!(r.error(), Some(&"bad"));
    assert_eq!(r.trace(), "");
}

#[test]
fn empty_task_is_a_driver_error() {
    let err = Task::<i32, i32>::default().try_run().unwrap_err();
    assert_eq!(err, RunError::EmptyTask);
    assert_eq!(err.to_string(), "cannot run an empty task");
}

#[test]
fn never_finishing_task_hits_resume_limit() {
    let task: Task<i32, i32> = TaskBuilder::new()
        .name("forever")
        .config(RunConfig::new().with_resume_limit(3))
        .spawn(|_cx| async move {
            std::future::pending::<()>().await;
            Outcome::Ok(1)
        });
    let err = task.try_run().unwrap_err();
    assert!(err.to_string().contains("(forever) still suspended after 3 resumes"));
}

#[test]
#[should_panic(expected = "still suspended after 1 resumes")]
fn run_panics_on_resume_limit() {
    let task: Task<i32, i32> = TaskBuilder::new()
        .config(RunConfig::new().with_resume_limit(1))
        .spawn(|_cx| async move {
            std::future::pending::<()>().await;
            Outcome::Ok(1)
        });
    task.run();
}

#[test]
#[should_panic(expected = "body failure")]
fn body_panics_are_not_caught() {
    let _task: Task<i32, i32> = Task::new(|_cx| async move {
        if true {
            panic!("body failure");
        }
        Outcome::Ok(1)
    });
}
