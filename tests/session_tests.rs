// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the session screen flow

use photobooth::{Screen, Session};

#[test]
fn test_full_session_with_retake() {
    let mut session = Session::new();

    // landing → camera → processing → result
    session.start_capture().unwrap();
    session.begin_processing().unwrap();
    session.finish_processing().unwrap();
    assert_eq!(session.screen(), Screen::Result);

    // retake loops back through capture
    session.retake().unwrap();
    session.begin_processing().unwrap();
    session.finish_processing().unwrap();
    assert_eq!(session.screen(), Screen::Result);

    // and a new session ends at the landing screen
    session.cancel().unwrap();
    assert_eq!(session.screen(), Screen::Landing);
}

#[test]
fn test_compose_failure_is_not_a_dead_end() {
    let mut session = Session::new();
    session.start_capture().unwrap();
    session.begin_processing().unwrap();

    // composer failed: back to camera, ready to capture again
    session.fail_processing().unwrap();
    assert_eq!(session.screen(), Screen::Camera);
    assert!(session.begin_processing().is_ok());
}

#[test]
fn test_backward_jumps_are_limited() {
    let mut session = Session::new();
    session.start_capture().unwrap();
    session.begin_processing().unwrap();

    // processing only exits through finish or fail
    assert!(session.cancel().is_err());
    assert!(session.retake().is_err());
    assert!(session.start_capture().is_err());
}
