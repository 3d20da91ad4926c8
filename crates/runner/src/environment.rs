//! Host environment capture
//!
//! Throughput numbers only mean something next to the machine that produced
//! them: the cache hierarchy decides where the random walks fall off a cliff
//! and the page size decides how often they miss the TLB. Every run logs a
//! capture and `sympathy env` prints the full report.
//!
//! Capture never fails. Anything that cannot be read is reported as
//! `unknown` or left out.

use serde::Serialize;
#[cfg(target_os = "linux")]
use std::fs;
use std::process::Command;

/// Snapshot of the host.
#[derive(Debug, Clone, Serialize)]
pub struct Environment {
    /// Operating system
    pub os: OsInfo,
    /// Processor and caches
    pub cpu: CpuInfo,
    /// Physical memory
    pub memory: MemoryInfo,
    /// Virtual memory page size in bytes, if known
    pub page_size: Option<u64>,
    /// `debug` or `release`
    pub profile: String,
    /// UTC capture time, RFC 3339
    pub timestamp: String,
}

/// Operating system details.
#[derive(Debug, Clone, Serialize)]
pub struct OsInfo {
    /// Distribution or product name
    pub name: String,
    /// Distribution or product version
    pub version: String,
    /// Kernel release
    pub kernel: String,
}

/// Processor details.
#[derive(Debug, Clone, Serialize)]
pub struct CpuInfo {
    /// Model string
    pub model: String,
    /// Physical cores
    pub cores: usize,
    /// Logical threads
    pub threads: usize,
    /// L1 data cache
    pub cache_l1d: Option<String>,
    /// L1 instruction cache
    pub cache_l1i: Option<String>,
    /// L2 cache
    pub cache_l2: Option<String>,
    /// L3 cache
    pub cache_l3: Option<String>,
}

/// Memory details.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryInfo {
    /// Installed memory in GiB
    pub total_gb: f64,
    /// Memory available to new allocations in GiB
    pub available_gb: f64,
}

impl Environment {
    /// Capture the current environment.
    pub fn capture() -> Self {
        Environment {
            os: capture_os_info(),
            cpu: capture_cpu_info(),
            memory: capture_memory_info(),
            page_size: capture_page_size(),
            profile: if cfg!(debug_assertions) {
                "debug".to_string()
            } else {
                "release".to_string()
            },
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }

    /// Compact one-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} {} | {} ({} cores / {} threads) | L2 {} | L3 {} | {:.0}GB | {} build",
            self.os.name,
            self.os.kernel,
            self.cpu.model,
            self.cpu.cores,
            self.cpu.threads,
            self.cpu.cache_l2.as_deref().unwrap_or("?"),
            self.cpu.cache_l3.as_deref().unwrap_or("?"),
            self.memory.total_gb,
            self.profile,
        )
    }

    /// Multi-line human-readable report.
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Captured:  {}\n", self.timestamp));
        out.push_str(&format!("Profile:   {}\n", self.profile));
        if self.profile == "debug" {
            out.push_str("           (debug builds are not representative, use --release)\n");
        }

        out.push_str("\n[Operating System]\n");
        out.push_str(&format!("  Name:      {}\n", self.os.name));
        out.push_str(&format!("  Version:   {}\n", self.os.version));
        out.push_str(&format!("  Kernel:    {}\n", self.os.kernel));

        out.push_str("\n[CPU]\n");
        out.push_str(&format!("  Model:     {}\n", self.cpu.model));
        out.push_str(&format!("  Cores:     {} physical\n", self.cpu.cores));
        out.push_str(&format!("  Threads:   {} logical\n", self.cpu.threads));

        out.push_str("\n[Cache Hierarchy]\n");
        let caches = [
            ("L1d", &self.cpu.cache_l1d),
            ("L1i", &self.cpu.cache_l1i),
            ("L2", &self.cpu.cache_l2),
            ("L3", &self.cpu.cache_l3),
        ];
        for (level, size) in caches {
            if let Some(size) = size {
                out.push_str(&format!("  {:<10} {}\n", format!("{}:", level), size));
            }
        }

        out.push_str("\n[Memory]\n");
        out.push_str(&format!("  Total:     {:.1} GB\n", self.memory.total_gb));
        out.push_str(&format!("  Available: {:.1} GB\n", self.memory.available_gb));
        match self.page_size {
            Some(bytes) => out.push_str(&format!("  Page size: {}\n", format_size(bytes))),
            None => out.push_str("  Page size: unknown\n"),
        }
        out
    }

    /// Pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
}

fn unknown() -> String {
    "unknown".to_string()
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 && bytes % (1024 * 1024) == 0 {
        format!("{}M", bytes / (1024 * 1024))
    } else if bytes >= 1024 && bytes % 1024 == 0 {
        format!("{}K", bytes / 1024)
    } else {
        format!("{}B", bytes)
    }
}

/// Value of a `KEY="value"` line in an os-release file.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn os_release_field(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .find_map(|l| l.strip_prefix(key)?.strip_prefix('='))
        .map(|v| v.trim_matches('"').to_string())
}

/// `(model, threads, physical cores)` from `/proc/cpuinfo` text.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cpuinfo(cpuinfo: &str) -> (Option<String>, usize, usize) {
    let model = cpuinfo
        .lines()
        .find(|l| l.starts_with("model name"))
        .and_then(|l| l.split(':').nth(1))
        .map(|s| s.trim().to_string());

    let threads = cpuinfo
        .lines()
        .filter(|l| l.starts_with("processor"))
        .count();

    let mut cores: Vec<(&str, &str)> = Vec::new();
    let mut physical_id = "0";
    for line in cpuinfo.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "physical id" => physical_id = value.trim(),
            "core id" => {
                let core = (physical_id, value.trim());
                if !cores.contains(&core) {
                    cores.push(core);
                }
            }
            _ => {}
        }
    }
    let cores = if cores.is_empty() { threads } else { cores.len() };
    (model, threads, cores)
}

/// `(total, available)` in KiB from `/proc/meminfo` text.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_meminfo(meminfo: &str) -> (u64, u64) {
    let parse_kb = |prefix: &str| -> u64 {
        meminfo
            .lines()
            .find(|l| l.starts_with(prefix))
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };
    (parse_kb("MemTotal:"), parse_kb("MemAvailable:"))
}

fn capture_os_info() -> OsInfo {
    let kernel = command_output("uname", &["-r"]).unwrap_or_else(unknown);

    #[cfg(target_os = "linux")]
    {
        let release = fs::read_to_string("/etc/os-release").unwrap_or_default();
        OsInfo {
            name: os_release_field(&release, "PRETTY_NAME").unwrap_or_else(|| "Linux".to_string()),
            version: os_release_field(&release, "VERSION_ID").unwrap_or_else(unknown),
            kernel,
        }
    }

    #[cfg(target_os = "macos")]
    {
        OsInfo {
            name: "macOS".to_string(),
            version: command_output("sw_vers", &["-productVersion"]).unwrap_or_else(unknown),
            kernel,
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        OsInfo {
            name: std::env::consts::OS.to_string(),
            version: unknown(),
            kernel,
        }
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

fn capture_cpu_info() -> CpuInfo {
    #[cfg(target_os = "linux")]
    {
        let cpuinfo = fs::read_to_string("/proc/cpuinfo").unwrap_or_default();
        let (model, threads, cores) = parse_cpuinfo(&cpuinfo);
        let threads = if threads == 0 { available_threads() } else { threads };
        let cache = |index: u32| {
            fs::read_to_string(format!("/sys/devices/system/cpu/cpu0/cache/index{}/size", index))
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        CpuInfo {
            model: model.unwrap_or_else(unknown),
            cores: cores.max(1),
            threads,
            cache_l1d: cache(0),
            cache_l1i: cache(1),
            cache_l2: cache(2),
            cache_l3: cache(3),
        }
    }

    #[cfg(target_os = "macos")]
    {
        let sysctl_u64 = |name: &str| -> Option<u64> {
            command_output("sysctl", &["-n", name]).and_then(|s| s.parse().ok())
        };
        let threads = sysctl_u64("hw.logicalcpu")
            .map(|n| n as usize)
            .unwrap_or_else(available_threads);

        CpuInfo {
            model: command_output("sysctl", &["-n", "machdep.cpu.brand_string"])
                .unwrap_or_else(unknown),
            cores: sysctl_u64("hw.physicalcpu").map(|n| n as usize).unwrap_or(threads),
            threads,
            cache_l1d: sysctl_u64("hw.l1dcachesize").map(format_size),
            cache_l1i: sysctl_u64("hw.l1icachesize").map(format_size),
            cache_l2: sysctl_u64("hw.l2cachesize").map(format_size),
            cache_l3: sysctl_u64("hw.l3cachesize").map(format_size),
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        let threads = available_threads();
        CpuInfo {
            model: unknown(),
            cores: threads,
            threads,
            cache_l1d: None,
            cache_l1i: None,
            cache_l2: None,
            cache_l3: None,
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
const KIB_PER_GIB: f64 = 1024.0 * 1024.0;

fn capture_memory_info() -> MemoryInfo {
    #[cfg(target_os = "linux")]
    {
        let meminfo = fs::read_to_string("/proc/meminfo").unwrap_or_default();
        let (total_kb, available_kb) = parse_meminfo(&meminfo);
        MemoryInfo {
            total_gb: total_kb as f64 / KIB_PER_GIB,
            available_gb: available_kb as f64 / KIB_PER_GIB,
        }
    }

    #[cfg(target_os = "macos")]
    {
        let total_bytes = command_output("sysctl", &["-n", "hw.memsize"])
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);
        let page = capture_page_size().unwrap_or(4096);
        let free_pages = command_output("vm_stat", &[])
            .and_then(|out| {
                out.lines()
                    .find(|l| l.contains("Pages free"))
                    .and_then(|l| l.split(':').nth(1))
                    .and_then(|s| s.trim().trim_end_matches('.').parse::<u64>().ok())
            })
            .unwrap_or(0);
        MemoryInfo {
            total_gb: total_bytes as f64 / 1024.0 / KIB_PER_GIB,
            available_gb: (free_pages * page) as f64 / 1024.0 / KIB_PER_GIB,
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        MemoryInfo {
            total_gb: 0.0,
            available_gb: 0.0,
        }
    }
}

fn capture_page_size() -> Option<u64> {
    command_output("getconf", &["PAGESIZE"]).and_then(|s| s.parse().ok())
}
