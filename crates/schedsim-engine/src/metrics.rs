//! Aggregate performance metrics for a simulation run.
//!
//! [`PerformanceMetrics`] is recomputed from the registry after every
//! tick and every mutating command. Averages cover terminated processes
//! only; rates are relative to the ticks elapsed so far.

use schedsim_core::Process;

/// Scheduling quality metrics at the current tick.
///
/// Every field is `0.0` before anything has terminated or before the
/// first tick has elapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerformanceMetrics {
    /// Mean `waiting_time` over terminated processes.
    pub avg_waiting_time: f64,
    /// Mean `turnaround_time` over terminated processes.
    pub avg_turnaround_time: f64,
    /// Mean `start_time - arrival_time` over terminated processes.
    pub avg_response_time: f64,
    /// Percentage of elapsed ticks the CPU was busy, in `[0, 100]`.
    pub cpu_utilization: f64,
    /// Terminated processes per elapsed tick.
    pub throughput: f64,
}

impl PerformanceMetrics {
    /// Compute metrics from the process records.
    ///
    /// `busy_ticks` counts ticks in which some process executed;
    /// `elapsed_ticks` is the current tick counter.
    pub fn compute<'a>(
        processes: impl IntoIterator<Item = &'a Process>,
        busy_ticks: u64,
        elapsed_ticks: u64,
    ) -> Self {
        let mut terminated = 0u64;
        let mut waiting = 0u64;
        let mut turnaround = 0u64;
        let mut response = 0u64;
        for p in processes.into_iter().filter(|p| p.is_terminated()) {
            terminated += 1;
            waiting += p.waiting_time().unwrap_or(0);
            turnaround += p.turnaround_time().unwrap_or(0);
            response += p.response_time().unwrap_or(0);
        }

        let mut metrics = Self::default();
        if terminated > 0 {
            let n = terminated as f64;
            metrics.avg_waiting_time = waiting as f64 / n;
            metrics.avg_turnaround_time = turnaround as f64 / n;
            metrics.avg_response_time = response as f64 / n;
        }
        if elapsed_ticks > 0 {
            let elapsed = elapsed_ticks as f64;
            metrics.cpu_utilization = (busy_ticks.min(elapsed_ticks) as f64 / elapsed) * 100.0;
            metrics.throughput = terminated as f64 / elapsed;
        }
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim_core::{Pid, ProcessSpec};

    fn finished(pid: u64, burst: u32, arrival: u64, start: u64) -> Process {
        let mut p = Process::new(Pid(pid), ProcessSpec::new(burst, arrival, 0));
        p.admit();
        p.dispatch(start);
        while !p.execute() {}
        p.complete(start + u64::from(burst));
        p
    }

    #[test]
    fn empty_run_is_all_zero() {
        let m = PerformanceMetrics::compute(std::iter::empty(), 0, 0);
        assert_eq!(m, PerformanceMetrics::default());
    }

    #[test]
    fn idle_ticks_do_not_divide_by_zero() {
        let m = PerformanceMetrics::compute(std::iter::empty(), 0, 7);
        assert_eq!(m.cpu_utilization, 0.0);
        assert_eq!(m.throughput, 0.0);
    }

    #[test]
    fn averages_cover_terminated_only() {
        // P0 runs 0..5, P1 runs 5..8 (arrived 1), P2 never runs.
        let p0 = finished(0, 5, 0, 0);
        let p1 = finished(1, 3, 1, 5);
        let p2 = Process::new(Pid(2), ProcessSpec::new(8, 2, 0));
        let m = PerformanceMetrics::compute([&p0, &p1, &p2], 8, 8);
        assert_eq!(m.avg_waiting_time, 2.0);
        assert_eq!(m.avg_turnaround_time, 6.0);
        assert_eq!(m.avg_response_time, 2.0);
        assert_eq!(m.cpu_utilization, 100.0);
        assert_eq!(m.throughput, 0.25);
    }

    #[test]
    fn utilization_is_a_percentage() {
        let p0 = finished(0, 2, 0, 0);
        let m = PerformanceMetrics::compute([&p0], 2, 4);
        assert_eq!(m.cpu_utilization, 50.0);
    }
}
