//! Scoped acquisition of script VMs.
//!
//! A VM is popped from the idle list (or created) by [`VmPool::borrow`] and
//! pushed back when the returned guard drops, which also happens while
//! unwinding.

use crate::vm::Vm;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

type Factory<V> = Box<dyn Fn() -> V + Send + Sync>;

pub struct VmPool<V = Vm> {
    idle: Mutex<Vec<V>>,
    max_idle: usize,
    factory: Factory<V>,
    created: AtomicUsize,
}

impl VmPool<Vm> {
    /// Pool of reference VMs keeping at most `max_idle` idle instances.
    pub fn new(max_idle: usize) -> Self {
        Self::with_factory(max_idle, Vm::new)
    }
}

impl<V> VmPool<V> {
    pub fn with_factory<F>(max_idle: usize, factory: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
            factory: Box::new(factory),
            created: AtomicUsize::new(0),
        }
    }

    /// Borrow a VM for the lifetime of the guard.
    pub fn borrow(&self) -> PooledVm<'_, V> {
        let vm = self.idle.lock().pop().unwrap_or_else(|| {
            let total = self.created.fetch_add(1, Ordering::Relaxed) + 1;
            log::trace!("Creating script VM ({total} created so far)");
            (self.factory)()
        });

        PooledVm {
            pool: self,
            vm: Some(vm),
        }
    }

    /// Number of VMs currently parked in the pool.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    /// Number of VMs the pool has ever created.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    fn release(&self, vm: V) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(vm);
        }
    }
}

impl<V> std::fmt::Debug for VmPool<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VmPool")
            .field("idle", &self.idle())
            .field("max_idle", &self.max_idle)
            .field("created", &self.created())
            .finish()
    }
}

/// RAII guard returning its VM to the pool on drop.
pub struct PooledVm<'a, V = Vm> {
    pool: &'a VmPool<V>,
    vm: Option<V>,
}

impl<V> Deref for PooledVm<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.vm.as_ref().expect("vm is present until the guard drops")
    }
}

impl<V> DerefMut for PooledVm<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.vm.as_mut().expect("vm is present until the guard drops")
    }
}

impl<V> Drop for PooledVm<'_, V> {
    fn drop(&mut self) {
        if let Some(vm) = self.vm.take() {
            self.pool.release(vm);
        }
    }
}
