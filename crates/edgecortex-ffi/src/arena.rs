//! Arena lifecycle FFI: create, allocate, reset, query, raw data access,
//! destroy.
//!
//! Arenas are stored as `Arc<Mutex<MemoryArena>>` so the global `ARENAS`
//! table lock is held only for handle lookup; work on different arenas
//! never contends on it.

use std::sync::{Arc, Mutex};

use edgecortex_arena::MemoryArena;

use crate::handle::HandleTable;
use crate::status::EcStatus;

type ArenaArc = Arc<Mutex<MemoryArena>>;

static ARENAS: Mutex<HandleTable<ArenaArc>> = Mutex::new(HandleTable::new());

/// Clone the Arc for an arena handle, briefly locking the global table.
///
/// Returns `None` if the handle is invalid or the mutex is poisoned.
fn get_arena(handle: u64) -> Option<ArenaArc> {
    ARENAS.lock().ok()?.get(handle).cloned()
}

/// Create an arena of at least `size_bytes`, rounded up to 4096.
///
/// On success writes the handle to `handle_out` and returns `EC_OK`.
/// `size_bytes == 0` returns `INVALID_ARGUMENT`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_create(size_bytes: usize, handle_out: *mut u64) -> i32 {
    ffi_guard!({
        if handle_out.is_null() {
            return EcStatus::InvalidArgument as i32;
        }
        let arena = match MemoryArena::new(size_bytes) {
            Ok(a) => a,
            Err(e) => return EcStatus::from(&e) as i32,
        };
        let handle = match ffi_lock!(ARENAS).insert(Arc::new(Mutex::new(arena))) {
            Some(h) => h,
            None => return EcStatus::InternalError as i32,
        };
        // SAFETY: handle_out is non-null and valid per caller contract.
        unsafe { *handle_out = handle };
        EcStatus::Ok as i32
    })
}

/// Destroy an arena, releasing its buffer. Pointers previously obtained
/// from [`ec_arena_data`] dangle afterwards.
///
/// Destroying twice returns `INVALID_HANDLE` the second time.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_destroy(handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ARENAS).remove(handle) {
            Some(_) => EcStatus::Ok as i32,
            None => EcStatus::InvalidHandle as i32,
        }
    })
}

/// Bump-allocate `n` bytes with no alignment padding; writes the offset.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_allocate(handle: u64, n: usize, offset_out: *mut usize) -> i32 {
    ffi_guard!({
        if offset_out.is_null() {
            return EcStatus::InvalidArgument as i32;
        }
        let arena_arc = match get_arena(handle) {
            Some(arc) => arc,
            None => return EcStatus::InvalidHandle as i32,
        };
        let arena = ffi_lock!(arena_arc);
        match arena.allocate(n) {
            Ok(offset) => {
                // SAFETY: offset_out is non-null and valid per caller contract.
                unsafe { *offset_out = offset };
                EcStatus::Ok as i32
            }
            Err(e) => EcStatus::from(&e) as i32,
        }
    })
}

/// Bump-allocate `n` bytes at an address that is a multiple of `alignment`.
///
/// `alignment == 0` selects the arena's default alignment (64).
/// A non-power-of-two alignment returns `INVALID_ARGUMENT`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_allocate_aligned(
    handle: u64,
    n: usize,
    alignment: usize,
    offset_out: *mut usize,
) -> i32 {
    ffi_guard!({
        if offset_out.is_null() {
            return EcStatus::InvalidArgument as i32;
        }
        let arena_arc = match get_arena(handle) {
            Some(arc) => arc,
            None => return EcStatus::InvalidHandle as i32,
        };
        let arena = ffi_lock!(arena_arc);
        let alignment = if alignment == 0 {
            arena.default_alignment()
        } else {
            alignment
        };
        match arena.allocate_aligned(n, alignment) {
            Ok(offset) => {
                // SAFETY: offset_out is non-null and valid per caller contract.
                unsafe { *offset_out = offset };
                EcStatus::Ok as i32
            }
            Err(e) => EcStatus::from(&e) as i32,
        }
    })
}

/// Rewind the arena's cursor to zero. Bytes are left as they are.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_reset(handle: u64) -> i32 {
    ffi_guard!({
        let arena_arc = match get_arena(handle) {
            Some(arc) => arc,
            None => return EcStatus::InvalidHandle as i32,
        };
        ffi_lock!(arena_arc).reset();
        EcStatus::Ok as i32
    })
}

/// Read one `usize` property of an arena into `out`.
#[allow(unsafe_code)]
fn query(handle: u64, out: *mut usize, read: impl FnOnce(&MemoryArena) -> usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return EcStatus::InvalidArgument as i32;
        }
        let arena_arc = match get_arena(handle) {
            Some(arc) => arc,
            None => return EcStatus::InvalidHandle as i32,
        };
        let arena = ffi_lock!(arena_arc);
        let value = read(&arena);
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = value };
        EcStatus::Ok as i32
    })
}

/// Aligned capacity in bytes.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_size(handle: u64, out: *mut usize) -> i32 {
    query(handle, out, MemoryArena::size)
}

/// Bytes allocated since creation or the last reset, padding included.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_used(handle: u64, out: *mut usize) -> i32 {
    query(handle, out, MemoryArena::used)
}

/// Bytes still available.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_remaining(handle: u64, out: *mut usize) -> i32 {
    query(handle, out, MemoryArena::remaining)
}

/// Base address and length of the arena's byte buffer.
///
/// The pointer stays valid and stable until [`ec_arena_destroy`]; reset
/// does not move it. The caller must not write through it while another
/// thread is inside a call on the same arena.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ec_arena_data(handle: u64, ptr_out: *mut *mut u8, len_out: *mut usize) -> i32 {
    ffi_guard!({
        if ptr_out.is_null() || len_out.is_null() {
            return EcStatus::InvalidArgument as i32;
        }
        let arena_arc = match get_arena(handle) {
            Some(arc) => arc,
            None => return EcStatus::InvalidHandle as i32,
        };
        let mut arena = ffi_lock!(arena_arc);
        let (ptr, len) = (arena.as_mut_ptr(), arena.size());
        // SAFETY: both out-pointers are non-null and valid per caller contract.
        unsafe {
            *ptr_out = ptr;
            *len_out = len;
        }
        EcStatus::Ok as i32
    })
}
