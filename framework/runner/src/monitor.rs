use crosswind_core::prelude::StopListener;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// CPU usage, as a percentage of total capacity, above which latency numbers become suspect.
const HIGH_CPU_USAGE_PCT: f32 = 10.0;

/// Monitor the resource usage of the benchmark process and report high usage.
///
/// Note that this won't stop the run, it only logs a warning so the user knows that measured
/// latencies might be inflated by the benchmark process itself competing for the CPU.
///
/// The CPU usage for the process is collected every [sysinfo::MINIMUM_CPU_UPDATE_INTERVAL] until the
/// listener is told to stop.
pub(crate) fn start_monitor(stop_listener: StopListener) {
    let spawned = std::thread::Builder::new()
        .name("monitor".to_string())
        .spawn(move || {
            let this_process_pid = Pid::from_u32(std::process::id());
            let mut sys = System::new();

            sys.refresh_cpu_all();
            let cpu_count = sys.cpus().len().max(1);

            while !stop_listener.should_stop() {
                sys.refresh_processes_specifics(
                    ProcessesToUpdate::Some(&[this_process_pid]),
                    true,
                    ProcessRefreshKind::nothing().with_cpu(),
                );

                if let Some(process) = sys.process(this_process_pid) {
                    let usage = process.cpu_usage() / cpu_count as f32;
                    if usage > HIGH_CPU_USAGE_PCT {
                        log::warn!("High CPU usage detected. The benchmark is using {usage:.2}% of the CPU, with {cpu_count} available cores");
                    }
                }

                std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            }

            log::trace!("Monitor thread shutting down");
        });

    if let Err(e) = spawned {
        log::warn!("Failed to start resource monitor: {e}");
    }
}
