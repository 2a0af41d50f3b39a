//! Property tests for the completion and propagation rules.

use std::cell::Cell;
use std::rc::Rc;

use expected::{Outcome, Task, EERROR};
use proptest::prelude::*;

fn same_type(
    value: i64,
    fail: bool,
) -> Task<i64, i64> {
    Task::new(move |_cx| async move {
        if fail {
            (EERROR | value).into()
        } else {
            Outcome::Ok(value)
        }
    })
}

proptest! {
    #[test]
    fn success_identity(v in any::<i64>()) {
        let r = Task::<i64, String>::new(move |_cx| async move { Outcome::Ok(v) }).run();
        prop_assert_eq!(r.value(), Some(&v));
        prop_assert!(r.error().is_none());
    }

    #[test]
    fn direct_error_identity(e in "[a-z ]{0,16}") {
        let expected_error = e.clone();
        let r = Task::<i64, String>::new(move |_cx| async move { Outcome::Err(e) }).run();
        prop_assert_eq!(r.error(), Some(&expected_error));
        prop_assert!(r.value().is_none());
    }

    #[test]
    fn same_type_channels_never_confused(v in any::<i64>(), fail in any::<bool>()) {
        let r = same_type(v, fail).run();
        if fail {
            prop_assert_eq!(r.error(), Some(&v));
            prop_assert!(r.value().is_none());
        } else {
            prop_assert_eq!(r.value(), Some(&v));
            prop_assert!(r.error().is_none());
        }
    }

    #[test]
    fn pass_through_applies_continuation(b in -1_000_000i64..1_000_000) {
        let r = Task::new(move |cx| async move {
            let got = cx.wait(same_type(b, false)).await;
            Outcome::Ok(got * 3 - 1)
        })
        .run();
        prop_assert_eq!(r.value(), Some(&(b * 3 - 1)));
    }

    #[test]
    fn failure_short_circuits_with_same_error(e in any::<i64>()) {
        let after = Rc::new(Cell::new(false));
        let flag = Rc::clone(&after);
        let r = Task::new(move |cx| async move {
            let got = cx.wait(same_type(e, true)).await;
            flag.set(true);
            Outcome::Ok(got)
        })
        .run();
        prop_assert_eq!(r.error(), Some(&e));
        prop_assert!(!after.get());
    }

    #[test]
    fn explicit_trace_survives_propagation(trace in "[a-z:]{1,24}", e in any::<u8>()) {
        let site = trace.clone();
        let r = Task::new(move |cx| async move {
            let dependency: Task<u8, u8> = Task::ready(EERROR.bind(e).with_trace(site).into());
            cx.wait(dependency).await;
            Outcome::Ok(0u8)
        })
        .run();
        prop_assert_eq!(r.trace(), trace.as_str());
        prop_assert_eq!(r.error(), Some(&e));
    }
}
