//! Configured handling of rejected list inputs.
//!
//! This binary installs `LeaveUntouched` with a small length limit, so a
//! rejected call leaves the previous record in the return-area.

mod common;

use std::sync::Once;

use df_primitives::{DfError, GuestConfig, InvalidInputPolicy, ListS64};
use df_wasm_guest::{config, configure, native, read_ret_area};
use test_log::test;

use common::*;

const MAX_LEN: usize = 4;

static CONFIGURE: Once = Once::new();

fn setup() {
    CONFIGURE.call_once(|| {
        let config = GuestConfig::default()
            .with_invalid_input(InvalidInputPolicy::LeaveUntouched)
            .with_max_list_len(MAX_LEN);
        configure(config).expect("configured before first call");
    });
}

#[test]
fn test_config_is_installed_once() {
    setup();
    assert_eq!(config().invalid_input, InvalidInputPolicy::LeaveUntouched);
    assert_eq!(config().max_list_len, MAX_LEN);
    assert_eq!(
        configure(GuestConfig::default()),
        Err(DfError::AlreadyInstalled("config"))
    );
}

#[test]
fn test_rejection_leaves_previous_record() {
    setup();
    let input = HostList::copy_in(&[3, 4]);
    let addr = unsafe { df_wasm_guest::square_vec(input.ptr, input.len) };
    let first = unsafe { read_ret_area(addr) };
    assert_eq!(copy_out(first), vec![9, 16]);

    let other = HostList::copy_in(&[1, 2, 3]);
    let again = unsafe { df_wasm_guest::mult_vec(input.ptr, input.len, other.ptr, other.len) };
    assert_eq!(again, addr);
    assert_eq!(unsafe { read_ret_area(again) }, first);

    release(first);
}

#[test]
fn test_fresh_thread_starts_with_empty_record() {
    setup();
    let is_empty = std::thread::spawn(|| {
        let addr = unsafe { df_wasm_guest::square_vec(core::ptr::null(), 0) };
        (unsafe { read_ret_area(addr) }) == ListS64::EMPTY
    })
    .join()
    .unwrap();
    assert!(is_empty);
}

#[test]
fn test_export_rejects_list_over_limit() {
    setup();
    let input = HostList::copy_in(&[1, 2]);
    let addr = unsafe { df_wasm_guest::square_vec(input.ptr, input.len) };
    let first = unsafe { read_ret_area(addr) };

    let long = HostList::copy_in(&[1, 2, 3, 4, 5]);
    let again = unsafe { df_wasm_guest::square_vec(long.ptr, long.len) };
    assert_eq!(unsafe { read_ret_area(again) }, first);
    let again = unsafe { df_wasm_guest::mult_vec(long.ptr, long.len, long.ptr, long.len) };
    assert_eq!(unsafe { read_ret_area(again) }, first);

    assert_eq!(copy_out(first), vec![1, 4]);
    release(first);
}

#[test]
fn test_length_limit() {
    setup();
    assert_eq!(call_square_vec(&[1, 2, 3, 4]), vec![1, 4, 9, 16]);
    assert_eq!(
        native::square_vec(&[1, 2, 3, 4, 5]).unwrap_err(),
        DfError::TooLong { len: 5, max: MAX_LEN }
    );
    assert_eq!(
        native::mult_vec(&[1; 5], &[1; 5]).unwrap_err(),
        DfError::TooLong { len: 5, max: MAX_LEN }
    );
}
