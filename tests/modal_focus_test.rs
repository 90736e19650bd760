// Integration tests for the modal focus manager

mod common;

use std::time::Duration;

use common::TestPageBuilder;
use parlor::prelude::*;

const SETTLE: Duration = Duration::from_millis(100);

#[test]
fn open_transition_focuses_the_input_after_the_settle_delay() {
    let mut page = TestPageBuilder::new().build();
    page.mount_modal();

    page.runtime.document_mut().add_class(page.modal, "modal-open");
    page.runtime.flush();
    assert_eq!(
        page.runtime.document().active_element(),
        None,
        "focus must wait for the settle delay"
    );

    page.runtime.advance(SETTLE);
    assert_eq!(
        page.runtime.document().active_element(),
        Some(page.modal_input)
    );
}

#[test]
fn focus_does_not_fire_before_the_settle_delay_elapses() {
    let mut page = TestPageBuilder::new().build();
    page.mount_modal();

    page.runtime.document_mut().add_class(page.modal, "modal-open");
    page.runtime.flush();

    page.runtime.advance(Duration::from_millis(60));
    assert_eq!(page.runtime.document().active_element(), None);

    page.runtime.advance(Duration::from_millis(40));
    assert_eq!(
        page.runtime.document().active_element(),
        Some(page.modal_input)
    );
}

#[test]
fn non_open_mutations_schedule_nothing() {
    let mut page = TestPageBuilder::new().build();
    page.mount_modal();

    // unrelated class traffic on the modal element
    page.runtime.document_mut().add_class(page.modal, "shaded");
    page.runtime.flush();
    assert_eq!(page.runtime.pending_timers(), 0);

    // a transition to closed (from closed) is also not an open transition
    page.runtime.document_mut().remove_class(page.modal, "shaded");
    page.runtime.flush();
    assert_eq!(page.runtime.pending_timers(), 0);

    page.runtime.advance(SETTLE);
    assert_eq!(page.runtime.document().active_element(), None);
}

#[test]
fn reopening_before_the_delay_cancels_and_replaces_the_timer() {
    let mut page = TestPageBuilder::new().build();
    page.mount_modal();

    page.runtime.document_mut().add_class(page.modal, "modal-open");
    page.runtime.flush();
    page.runtime.advance(Duration::from_millis(50));

    page.runtime.document_mut().remove_class(page.modal, "modal-open");
    page.runtime.flush();
    page.runtime.document_mut().add_class(page.modal, "modal-open");
    page.runtime.flush();

    assert_eq!(
        page.runtime.pending_timers(),
        1,
        "a new open transition must not stack settle timers"
    );

    // the replacement timer runs on the new schedule
    page.runtime.advance(Duration::from_millis(60));
    assert_eq!(page.runtime.document().active_element(), None);
    page.runtime.advance(Duration::from_millis(40));
    assert_eq!(
        page.runtime.document().active_element(),
        Some(page.modal_input)
    );
}

#[test]
fn staying_open_does_not_refocus() {
    let mut page = TestPageBuilder::new().build();
    page.mount_modal();

    page.runtime.document_mut().add_class(page.modal, "modal-open");
    page.runtime.flush();
    page.runtime.advance(SETTLE);
    assert_eq!(
        page.runtime.document().active_element(),
        Some(page.modal_input)
    );

    // class traffic while already open must not schedule another focus
    page.runtime.document_mut().add_class(page.modal, "shaded");
    page.runtime.flush();
    assert_eq!(page.runtime.pending_timers(), 0);
}

#[test]
fn missing_input_at_fire_time_is_a_silent_noop() {
    let mut page = TestPageBuilder::new().build();
    page.mount_modal();

    page.runtime.document_mut().add_class(page.modal, "modal-open");
    page.runtime.flush();
    page.runtime.remove_element(page.modal_input);

    page.runtime.advance(SETTLE);
    assert_eq!(page.runtime.document().active_element(), None);
}

#[test]
fn unmounting_disconnects_the_observer_and_drops_the_timer() {
    let mut page = TestPageBuilder::new().build();
    page.mount_modal();

    // a pending settle timer dies with the hook
    page.runtime.document_mut().add_class(page.modal, "modal-open");
    page.runtime.flush();
    assert_eq!(page.runtime.pending_timers(), 1);

    assert!(page.runtime.unmount(page.modal));
    assert_eq!(page.runtime.pending_timers(), 0);
    assert_eq!(page.runtime.active_subscriptions(), 0);

    page.runtime.advance(SETTLE);
    assert_eq!(page.runtime.document().active_element(), None);

    // later open transitions reach nobody
    page.runtime.document_mut().remove_class(page.modal, "modal-open");
    page.runtime.flush();
    page.runtime.document_mut().add_class(page.modal, "modal-open");
    page.runtime.flush();
    page.runtime.advance(SETTLE);
    assert_eq!(page.runtime.document().active_element(), None);
}
