//! Counting semaphore for capping concurrent collaborator calls.
//!
//! Uses `Mutex + Condvar` from std — no external dependencies. Permits
//! are returned through an RAII guard, so a panicking task can never
//! leak one.

use std::sync::{Condvar, Mutex};

/// A counting semaphore with a fixed permit capacity.
pub struct Semaphore {
    free: Mutex<usize>,
    wakeup: Condvar,
    capacity: usize,
}

/// Holds one permit; dropping it returns the permit and wakes one waiter.
#[must_use = "dropping the permit immediately releases it"]
pub struct SemaphorePermit<'a> {
    sem: &'a Semaphore,
}

impl Semaphore {
    /// Create a semaphore with `capacity` permits, all initially free.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(capacity),
            wakeup: Condvar::new(),
            capacity,
        }
    }

    /// Permit capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Block until a permit is free, then take it.
    pub fn acquire(&self) -> SemaphorePermit<'_> {
        let mut free = self.free.lock().expect("semaphore lock poisoned");
        while *free == 0 {
            free = self.wakeup.wait(free).expect("semaphore lock poisoned");
        }
        *free -= 1;
        SemaphorePermit { sem: self }
    }

    /// Take a permit if one is free right now, without blocking.
    pub fn try_acquire(&self) -> Option<SemaphorePermit<'_>> {
        let mut free = self.free.lock().expect("semaphore lock poisoned");
        if *free == 0 {
            return None;
        }
        *free -= 1;
        Some(SemaphorePermit { sem: self })
    }
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        let mut free = self.sem.free.lock().expect("semaphore lock poisoned");
        *free += 1;
        self.sem.wakeup.notify_one();
    }
}
