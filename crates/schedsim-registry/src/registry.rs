//! The process registry: pid assignment, validation, and lookup.

use indexmap::IndexMap;
use schedsim_core::{Pid, Process, ProcessSpec, ProcessState, ProcessView, RegistryError};

/// Owns the process records of one simulation instance.
///
/// Records are kept in ascending pid order, which is also registration
/// order because pids come from a monotonic counter. The counter is
/// never rewound, so a pid is never reused, even after [`clear()`].
///
/// [`clear()`]: ProcessRegistry::clear
#[derive(Clone, Debug, Default)]
pub struct ProcessRegistry {
    processes: IndexMap<Pid, Process>,
    next_pid: u64,
}

impl ProcessRegistry {
    /// An empty registry whose first pid is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `spec` and register a new process in the New state.
    pub fn add(&mut self, spec: ProcessSpec) -> Result<&Process, RegistryError> {
        spec.validate()?;
        let pid = Pid(self.next_pid);
        self.next_pid += 1;
        log::debug!(
            "registered {pid}: burst={} arrival={} priority={}",
            spec.burst_time,
            spec.arrival_time,
            spec.priority
        );
        let entry = self.processes.entry(pid).or_insert(Process::new(pid, spec));
        Ok(&*entry)
    }

    /// Check whether the definition of `pid` may still be edited.
    ///
    /// Only processes that have never run and are New or Ready qualify.
    pub fn check_editable(&self, pid: Pid) -> Result<(), RegistryError> {
        let process = self.get(pid).ok_or(RegistryError::ProcessNotFound { pid })?;
        match process.state() {
            ProcessState::Terminated => Err(RegistryError::ProcessAlreadyTerminated { pid }),
            ProcessState::New => Ok(()),
            ProcessState::Ready if !process.has_started() => Ok(()),
            state => Err(RegistryError::InvalidState { pid, state }),
        }
    }

    /// Replace the definition of a process that has not yet run.
    ///
    /// On success the process is back in New with `remaining_time`
    /// equal to the new burst. The caller is responsible for removing
    /// the pid from the ready queue if it was queued.
    pub fn update(&mut self, pid: Pid, spec: ProcessSpec) -> Result<&Process, RegistryError> {
        spec.validate()?;
        self.check_editable(pid)?;
        let process = self
            .processes
            .get_mut(&pid)
            .ok_or(RegistryError::ProcessNotFound { pid })?;
        process.redefine(spec);
        log::debug!("redefined {pid}");
        Ok(&*process)
    }

    /// Remove a process, returning its final record.
    pub fn remove(&mut self, pid: Pid) -> Result<Process, RegistryError> {
        let removed = self
            .processes
            .shift_remove(&pid)
            .ok_or(RegistryError::ProcessNotFound { pid })?;
        log::debug!("removed {pid} in state {}", removed.state());
        Ok(removed)
    }

    /// Drop every record. The pid counter keeps counting.
    pub fn clear(&mut self) {
        self.processes.clear();
    }

    /// Return every process to New, keeping definitions.
    pub fn reset_runtime(&mut self) {
        for process in self.processes.values_mut() {
            process.reset_runtime();
        }
    }

    /// Look up a process.
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(&pid)
    }

    /// Look up a process for an engine transition.
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.processes.get_mut(&pid)
    }

    /// Whether `pid` is registered.
    pub fn contains(&self, pid: Pid) -> bool {
        self.processes.contains_key(&pid)
    }

    /// All processes in ascending pid order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.values()
    }

    /// All processes in ascending pid order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.processes.values_mut()
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// The pid the next registration will receive.
    pub fn next_pid(&self) -> Pid {
        Pid(self.next_pid)
    }

    /// Owned views of every process, in pid order.
    pub fn views(&self) -> Vec<ProcessView> {
        self.processes.values().map(ProcessView::from).collect()
    }
}
