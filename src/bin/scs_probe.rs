use std::env;
use std::fs;
use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use scs_dp::{Aligner, Alphabet, DpMatrix, Metric, Phase, Strategy, Tabulation};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const DEFAULT_X: &str =
    "ozpxennwaelglzwocdybdmpmmcyconwcmlbsaoqcvciidewfiuiljaavcazqnvvbjyvjpmokqwstboa";
const DEFAULT_Y: &str = "iyklqkkdhnvwnrjbxkuyltiaqbllgsipqvaihmlozhnmyypxkjwwegyujjhqepfumhfuvqiuzvixtxxgivcobakllrbriimvrrpmjzgjxqisnfy";

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scs_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let (x, y) = match options.load_sequences() {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("scs_probe: {err}");
            std::process::exit(1);
        }
    };

    let alphabet = match Alphabet::from_sequences([x.as_slice(), y.as_slice()]) {
        Ok(a) => a,
        Err(_) => Alphabet::lowercase(),
    };
    let mut builder = Aligner::builder().alphabet(alphabet).threads(options.threads);
    if options.print_matrix {
        builder = builder.observer(|phase: Phase, matrix: &DpMatrix| {
            if let Phase::Row(i) = phase {
                let row: Vec<String> = matrix.row(i).iter().map(u32::to_string).collect();
                eprintln!("row {i:>4}: {}", row.join(" "));
            }
        });
    }
    let aligner = match builder.build() {
        Ok(a) => a,
        Err(err) => {
            eprintln!("scs_probe: {err}");
            std::process::exit(1);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("LCS/SCS kernel probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!("  |X| = {}, |Y| = {}, |Σ| = {}", x.len(), y.len(), aligner.alphabet().len());
    eprintln!("  threads = {}", aligner.threads());
    eprintln!("  verify limit = {}", options.verify_limit);
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();
    for &metric in &options.metrics {
        measurements.extend(run_metric(&aligner, metric, &x, &y, &options, &mut sys));
    }

    print_summary(&measurements);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scs_probe output error: {err}");
        std::process::exit(1);
    }
    if measurements
        .iter()
        .any(|m| matches!(m.verification_status, VerificationStatus::Failed))
    {
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    threads: usize,
    input: Option<String>,
    random_len: Option<usize>,
    seed: u64,
    metrics: Vec<Metric>,
    strategies: Vec<Strategy>,
    print_matrix: bool,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Table;
        let mut verify_limit = 4096usize;
        let mut threads = match env::var("SCS_DP_THREADS") {
            Ok(v) => parse_positive("SCS_DP_THREADS", &v)?,
            Err(_) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        };
        let mut input = None;
        let mut random_len = None;
        let mut seed = 42u64;
        let mut metrics = vec![Metric::Lcs, Metric::Scs];
        let mut strategies = Strategy::ALL.to_vec();
        let mut print_matrix = false;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {name}")),
                }
            };
            match flag.as_str() {
                "-h" | "--help" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--format" => format = OutputFormat::from_str(&value("--format")?)?,
                "--verify-limit" => {
                    verify_limit = parse_positive("--verify-limit", &value("--verify-limit")?)?
                }
                "--threads" => threads = parse_positive("--threads", &value("--threads")?)?,
                "--input" => input = Some(value("--input")?),
                "--length" => random_len = Some(parse_positive("--length", &value("--length")?)?),
                "--seed" => {
                    seed = value("--seed")?
                        .parse::<u64>()
                        .map_err(|_| "seed must be an unsigned integer".to_string())?
                }
                "--metric" => {
                    metrics = match value("--metric")?.as_str() {
                        "lcs" => vec![Metric::Lcs],
                        "scs" => vec![Metric::Scs],
                        "both" => vec![Metric::Lcs, Metric::Scs],
                        other => return Err(format!("unknown metric '{other}'")),
                    }
                }
                "--strategy" => {
                    let name = value("--strategy")?;
                    strategies = if name == "all" {
                        Strategy::ALL.to_vec()
                    } else {
                        vec![Strategy::from_name(&name)
                            .ok_or_else(|| format!("unknown strategy '{name}'"))?]
                    }
                }
                "--print-matrix" => print_matrix = true,
                _ => return Err(format!("unrecognized argument '{arg}'")),
            }
        }

        if input.is_some() && random_len.is_some() {
            return Err("--input and --length are mutually exclusive".to_string());
        }

        Ok(Self {
            format,
            verify_limit,
            threads,
            input,
            random_len,
            seed,
            metrics,
            strategies,
            print_matrix,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --release --bin scs_probe [-- <options>]

Runs every kernel on one sequence pair, times it, and checks the result
against the sequential baseline.

Input (default: two built-in sequences):
  --input <FILE>                Read X and Y from the first two lines of FILE
  --length <N>                  Generate two random lowercase sequences of length N
  --seed <S>                    Seed for --length (default: 42)

Options:
  --metric <lcs|scs|both>       Metric(s) to compute (default: both)
  --strategy <NAME|all>         sequential, wavefront, row_parallel,
                                row_parallel_branch_free, auto (default: all)
  --threads <N>                 Worker team size (default: $SCS_DP_THREADS or all cores)
  --format <csv|table|json>     Output format (default: table)
  --verify-limit <N>            Largest max(|X|, |Y|) checked against the baseline (default: 4096)
  --print-matrix                Dump every completed row to stderr
  -h, --help                    Print this help message

Examples:
  cargo run --release --bin scs_probe -- --length 10000 --threads 8
  cargo run --release --bin scs_probe -- --input input/input-2000.txt --format csv
"
        );
    }

    fn load_sequences(&self) -> Result<(Vec<u8>, Vec<u8>), String> {
        if let Some(path) = &self.input {
            let text =
                fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))?;
            let mut lines = text.lines().map(str::trim_end);
            let x = lines
                .next()
                .ok_or_else(|| format!("'{path}' has no first line"))?;
            let y = lines
                .next()
                .ok_or_else(|| format!("'{path}' has no second line"))?;
            return Ok((x.as_bytes().to_vec(), y.as_bytes().to_vec()));
        }
        if let Some(len) = self.random_len {
            let mut rng = StdRng::seed_from_u64(self.seed);
            return Ok((random_lowercase(&mut rng, len), random_lowercase(&mut rng, len)));
        }
        Ok((DEFAULT_X.as_bytes().to_vec(), DEFAULT_Y.as_bytes().to_vec()))
    }
}

fn parse_positive(name: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("{name} must be a positive integer")),
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    metric: Metric,
    strategy: Strategy,
    length: u32,
    wall_ms: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

fn run_metric(
    aligner: &Aligner,
    metric: Metric,
    x: &[u8],
    y: &[u8],
    options: &Options,
    sys: &mut System,
) -> Vec<Measurement> {
    eprintln!("[{metric}]");
    let verify = x.len().max(y.len()) <= options.verify_limit;
    let baseline = if verify {
        aligner
            .tabulate_with(x, y, metric, Strategy::Sequential)
            .map(|t| t.length())
            .ok()
    } else {
        None
    };

    options
        .strategies
        .iter()
        .map(|&strategy| {
            eprint!("      {:<26} ", strategy.as_str());
            let before = rss_kib(sys);
            let start = Instant::now();
            let result = aligner.tabulate_with(x, y, metric, strategy);
            let elapsed = start.elapsed();
            let after = rss_kib(sys);

            let (length, status, detail) = match result {
                Ok(tab) => {
                    let length = tab.length();
                    let (status, detail) = verify_against(baseline, &tab, x, y);
                    (length, status, detail)
                }
                Err(err) => (0, VerificationStatus::Failed, Some(err.to_string())),
            };
            let m = Measurement {
                metric,
                strategy,
                length,
                wall_ms: elapsed.as_secs_f64() * 1000.0,
                rss_delta_kib: after.saturating_sub(before),
                verification_status: status,
                verification_detail: detail,
            };
            let status_icon = match m.verification_status {
                VerificationStatus::Passed => "✓",
                VerificationStatus::Failed => "✗",
                VerificationStatus::NotChecked => "○",
            };
            eprintln!(
                "{} length={}, time={:.3}ms, status={}",
                status_icon,
                m.length,
                m.wall_ms,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn verify_against(
    baseline: Option<u32>,
    tab: &Tabulation<'_>,
    x: &[u8],
    y: &[u8],
) -> (VerificationStatus, Option<String>) {
    let Some(expected) = baseline else {
        return (VerificationStatus::NotChecked, None);
    };
    if tab.length() != expected {
        return (
            VerificationStatus::Failed,
            Some(format!("expected {expected}, got {}", tab.length())),
        );
    }
    if tab.metric() == Metric::Scs {
        match tab.supersequence() {
            Ok(s) if s.len() == expected as usize && is_subsequence(x, &s) && is_subsequence(y, &s) => {}
            Ok(_) => {
                return (
                    VerificationStatus::Failed,
                    Some("reconstructed supersequence is invalid".to_string()),
                )
            }
            Err(err) => return (VerificationStatus::Failed, Some(err.to_string())),
        }
    }
    (VerificationStatus::Passed, None)
}

fn is_subsequence(needle: &[u8], haystack: &[u8]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|c| it.any(|h| h == c))
}

fn print_summary(measurements: &[Measurement]) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Summary");
    eprintln!("{}", "=".repeat(80));

    let failed = measurements
        .iter()
        .filter(|m| matches!(m.verification_status, VerificationStatus::Failed))
        .count();
    for metric in [Metric::Lcs, Metric::Scs] {
        let runs: Vec<&Measurement> = measurements.iter().filter(|m| m.metric == metric).collect();
        if runs.is_empty() {
            continue;
        }
        let baseline = runs.iter().find(|m| m.strategy == Strategy::Sequential);
        eprintln!("  {metric}:");
        for m in &runs {
            match baseline {
                Some(base) if m.wall_ms > 0.0 => eprintln!(
                    "    {:<26} {:>10.3}ms  speedup {:>6.2}x",
                    m.strategy.as_str(),
                    m.wall_ms,
                    base.wall_ms / m.wall_ms
                ),
                _ => eprintln!("    {:<26} {:>10.3}ms", m.strategy.as_str(), m.wall_ms),
            }
        }
    }
    eprintln!();
    if failed == 0 {
        eprintln!("✓ All kernels agree.");
    } else {
        eprintln!("✗ {failed} run(s) failed:");
        for m in measurements {
            if let (VerificationStatus::Failed, Some(detail)) =
                (m.verification_status, &m.verification_detail)
            {
                eprintln!("  ✗ {}/{}: {}", m.metric.as_str(), m.strategy, detail);
            }
        }
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("metric,strategy,length,wall_ms,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{:.3},{},{},\"{}\"",
            m.metric.as_str(),
            m.strategy,
            m.length,
            m.wall_ms,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    println!(
        "{:<6}  {:<26}  {:>10}  {:>12}  {:>14}  {:>12}  detail",
        "metric", "strategy", "length", "wall_ms", "rss_delta_kib", "status"
    );
    println!(
        "{:-<6}  {:-<26}  {:-<10}  {:-<12}  {:-<14}  {:-<12}  {:-<12}",
        "", "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<6}  {:<26}  {:>10}  {:>12.3}  {:>14}  {:>12}  {}",
            m.metric.as_str(),
            m.strategy.as_str(),
            m.length,
            m.wall_ms,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"metric\":\"{}\",\"strategy\":\"{}\",\"length\":{},\"wall_ms\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.metric.as_str(),
            m.strategy,
            m.length,
            m.wall_ms,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

fn random_lowercase(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}
