use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for nes-core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test(TestArgs),
    /// Run benchmarks
    Bench,
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
}

#[derive(Args, Default)]
struct TestArgs {
    #[arg(long)]
    doc: bool,
    /// Run the ROM-based suites (needs tests/nes-test-rom/)
    #[arg(long)]
    ignored: bool,
    /// Run only CPU module tests
    #[arg(long)]
    cpu: bool,
    /// Run only PPU module tests
    #[arg(long)]
    ppu: bool,
    /// Run only APU module tests
    #[arg(long)]
    apu: bool,
    /// Run only cartridge and mapper tests
    #[arg(long)]
    mapper: bool,
}

/// Test selection: display name, lib filter, and integration test target
struct Module {
    name: &'static str,
    filter: &'static str,
    integration: Option<&'static str>,
}

const CPU: Module = Module {
    name: "CPU",
    filter: "cpu::",
    integration: Some("nestest"),
};
const PPU: Module = Module {
    name: "PPU",
    filter: "ppu::",
    integration: Some("frame_tests"),
};
const APU: Module = Module {
    name: "APU",
    filter: "apu::",
    integration: None,
};
const MAPPER: Module = Module {
    name: "Mapper",
    filter: "cartridge::",
    integration: Some("mapper_tests"),
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test(args) => run_test(&args),
        Commands::Bench => run_bench(),
        Commands::PreCommit => run_pre_commit(),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task("Test", || run_test(&TestArgs::default()), verbose)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_check(verbose: bool) -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ Checks passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("fmt").arg("--all");

    if check {
        cmd.arg("--").arg("--check");
    }

    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy").arg("--workspace").arg("--all-targets");

    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }

    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");

    if release {
        cmd.arg("--release");
    }

    execute_command(&mut cmd)
}

fn cargo_test(args: &TestArgs) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("test").arg("-p").arg("nes-core");
    if args.doc {
        cmd.arg("--doc");
    }
    cmd
}

fn with_ignored(cmd: &mut Command, ignored: bool) {
    if ignored {
        cmd.arg("--").arg("--ignored");
    }
}

fn run_test(args: &TestArgs) -> Result<()> {
    let selected: Vec<&Module> = [
        (args.cpu, &CPU),
        (args.ppu, &PPU),
        (args.apu, &APU),
        (args.mapper, &MAPPER),
    ]
    .into_iter()
    .filter_map(|(enabled, module)| enabled.then_some(module))
    .collect();

    if args.doc || selected.is_empty() {
        let mut cmd = cargo_test(args);
        with_ignored(&mut cmd, args.ignored);
        return execute_command(&mut cmd);
    }

    // Run each module's tests sequentially
    let mut failed = Vec::new();
    for module in &selected {
        println!("{} Running {} tests...", "→".blue(), module.name.bold());

        let mut lib = cargo_test(args);
        lib.arg("--lib").arg(module.filter);
        with_ignored(&mut lib, args.ignored);
        let mut result = execute_command(&mut lib);

        if let Some(target) = module.integration.filter(|_| result.is_ok()) {
            let mut integration = cargo_test(args);
            integration.arg("--test").arg(target);
            with_ignored(&mut integration, args.ignored);
            result = execute_command(&mut integration);
        }

        match result {
            Ok(()) => println!("{} {} tests passed\n", "✓".green(), module.name),
            Err(e) => {
                println!("{} {} tests failed\n", "✗".red(), module.name);
                if selected.len() == 1 {
                    return Err(e);
                }
                failed.push(module.name);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Tests failed for: {}", failed.join(", "))
    }
}

fn run_bench() -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("bench").arg("-p").arg("nes-core");

    execute_command(&mut cmd)
}

fn run_pre_commit() -> Result<()> {
    println!("{}", "=== Pre-commit Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), false)?;
    run_task("Clippy", || run_clippy(false), false)?;
    run_task("Test", || run_test(&TestArgs::default()), false)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ Pre-commit checks passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", elapsed.as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
