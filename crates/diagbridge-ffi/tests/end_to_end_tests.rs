//! End-to-end forwarding tests
//!
//! A capturing C callback is registered, the installed adapters are fired
//! the way ALSA and JACK fire them, and the triples the callback receives
//! are checked.

#![allow(non_snake_case)]

use diagbridge_ffi::prelude::*;
use diagbridge_ffi::register_with_hooks;
use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;
use std::sync::{Arc, Mutex};

static TEST_LOCK: Mutex<()> = Mutex::new(());
static CAPTURED: Mutex<Vec<(u8, String, Vec<u8>)>> = Mutex::new(Vec::new());

extern "C" fn capture_callback(severity: u8, source_tag: *const c_char, message: *const c_char) {
    let tag = unsafe { CStr::from_ptr(source_tag) }
        .to_string_lossy()
        .into_owned();
    let message = unsafe { CStr::from_ptr(message) }.to_bytes().to_vec();
    CAPTURED.lock().unwrap().push((severity, tag, message));
}

fn registered_hooks() -> RecordingHooks {
    let hooks = RecordingHooks::new();
    let report = register_with_hooks(&hooks, Arc::new(CallbackSink::new(capture_callback)));
    assert!(report.is_complete());
    CAPTURED.lock().unwrap().clear();
    hooks
}

fn take_captured() -> Vec<(u8, String, Vec<u8>)> {
    std::mem::take(&mut *CAPTURED.lock().unwrap())
}

#[test]
fn alsa_adapter___failed_device_busy___error_severity_alsa_tag() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = registered_hooks();
    let alsa = hooks.alsa_error_handler().unwrap();

    unsafe {
        alsa(
            c"pcm_hw.c".as_ptr(),
            1718,
            c"snd_pcm_hw_open".as_ptr(),
            -16,
            c"failed: %s".as_ptr(),
            c"device busy".as_ptr(),
        )
    };

    assert_eq!(
        take_captured(),
        vec![(3, "diagbridge::alsa".into(), b"failed: device busy".to_vec())]
    );
}

#[test]
fn jack_info_adapter___client_registered___info_severity_jack_tag() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = registered_hooks();
    let info = hooks.jack_info_handler().unwrap();

    unsafe { info(c"client registered".as_ptr()) };

    assert_eq!(
        take_captured(),
        vec![(2, "diagbridge::jack".into(), b"client registered".to_vec())]
    );
}

#[test]
fn jack_error_adapter___message___error_severity_jack_tag() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = registered_hooks();
    let error = hooks.jack_error_handler().unwrap();

    unsafe { error(c"cannot connect to server".as_ptr()) };

    assert_eq!(
        take_captured(),
        vec![(3, "diagbridge::jack".into(), b"cannot connect to server".to_vec())]
    );
}

#[test]
fn alsa_adapter___2000_byte_rendering___truncated_to_1023() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = registered_hooks();
    let alsa = hooks.alsa_error_handler().unwrap();
    let long = CString::new("ab".repeat(1000)).unwrap();

    unsafe {
        alsa(
            ptr::null(),
            0,
            ptr::null(),
            0,
            c"%s".as_ptr(),
            long.as_ptr(),
        )
    };

    let captured = take_captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].2.len(), MESSAGE_CAPACITY - 1);
    assert_eq!(captured[0].2, long.as_bytes()[..1023].to_vec());
}

#[test]
fn alsa_adapter___width_specifier_overflow___truncated_without_crash() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = registered_hooks();
    let alsa = hooks.alsa_error_handler().unwrap();

    unsafe {
        alsa(
            ptr::null(),
            0,
            ptr::null(),
            0,
            c"%2000d".as_ptr(),
            7 as c_int,
        )
    };

    let captured = take_captured();
    assert_eq!(captured[0].2, vec![b' '; 1023]);
}

#[test]
fn alsa_adapter___exactly_1023_bytes___forwarded_whole() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = registered_hooks();
    let alsa = hooks.alsa_error_handler().unwrap();
    let exact = CString::new("z".repeat(1023)).unwrap();

    unsafe {
        alsa(
            ptr::null(),
            0,
            ptr::null(),
            0,
            c"%s".as_ptr(),
            exact.as_ptr(),
        )
    };

    assert_eq!(take_captured()[0].2, exact.as_bytes().to_vec());
}

#[test]
fn jack_adapters___long_message___never_truncated() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = registered_hooks();
    let info = hooks.jack_info_handler().unwrap();
    let long = CString::new("j".repeat(5000)).unwrap();

    unsafe { info(long.as_ptr()) };

    assert_eq!(take_captured()[0].2.len(), 5000);
}

#[test]
fn registration___repeated___replaces_callback_keeps_adapters() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = registered_hooks();
    let first_alsa = hooks.alsa_error_handler().map(|h| h as usize);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_sink = seen.clone();

    register_with_hooks(
        &hooks,
        Arc::new(move |channel: Channel, message: &CStr| {
            seen_by_sink
                .lock()
                .unwrap()
                .push((channel, message.to_bytes().to_vec()));
        }),
    );
    let info = hooks.jack_info_handler().unwrap();
    unsafe { info(c"after".as_ptr()) };

    assert_eq!(hooks.alsa_error_handler().map(|h| h as usize), first_alsa);
    assert!(take_captured().is_empty());
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[(Channel::JackInfo, b"after".to_vec())]
    );
}

#[test]
fn tracing_sink___forwarded_diagnostics___do_not_panic_without_subscriber() {
    let _guard = TEST_LOCK.lock().unwrap();
    let hooks = RecordingHooks::new();
    register_with_hooks(&hooks, Arc::new(TracingSink::new()));
    let alsa = hooks.alsa_error_handler().unwrap();
    let dropped_before = SinkManager::global().dropped();

    unsafe {
        alsa(
            ptr::null(),
            0,
            ptr::null(),
            0,
            c"unknown PCM %s".as_ptr(),
            c"default".as_ptr(),
        )
    };

    assert_eq!(SinkManager::global().dropped(), dropped_before);
}
