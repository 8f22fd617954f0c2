//! pdbg build configuration CLI
//!
//! Detects the build environment and writes `makefile.config` into the pdbg
//! repo, where `makefile.base` includes it.
//!
//! Every value is determined in three ways, first match wins:
//!
//! 1. Command line options
//! 2. Environment variables set when the tool is invoked
//! 3. Default locations (i.e. `/usr/bin/g++`)
//!
//! # Usage
//!
//! ```bash
//! # Defaults for the host
//! pdbg-config --ecmd-repo ../ecmd --pdbg-repo .
//!
//! # Cross build for ppc64 with a specific swig
//! pdbg-config --ecmd-repo ../ecmd --pdbg-repo . --target ppc64 --swig /usr/local/swig/bin/swig
//!
//! # Only build some extensions
//! EXTENSIONS="cmd cip" pdbg-config --ecmd-repo ../ecmd --pdbg-repo .
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use pdbg_config::config::{resolve_config, Defaults, Inputs};
use pdbg_config::emit::write_config;
use pdbg_config::logging;
use pdbg_config::resolve::ProcessEnv;

#[derive(Parser)]
#[command(name = "pdbg-config")]
#[command(
    version,
    about = "Create all the variables necessary to build pdbg",
    long_about = "Create all the variables necessary to build pdbg.\n\n\
                  Values are determined in 3 ways:\n  \
                  1) Command line options to this tool\n  \
                  2) Environment variables defined when the tool is invoked\n  \
                  3) Looking in default locations (i.e. /usr/bin/g++)\n\n\
                  For most users building using the default packages of their distro,\n\
                  no options beyond the two repos should be required."
)]
struct Cli {
    /// The location of the eCMD repo to build against
    #[arg(long, value_name = "PATH", help_heading = "Required Arguments")]
    ecmd_repo: PathBuf,

    /// The location of the pdbg repo to build against
    #[arg(long, value_name = "PATH", help_heading = "Required Arguments")]
    pdbg_repo: PathBuf,

    /// Path to install to [env: INSTALL_PATH]
    #[arg(long, value_name = "PATH")]
    install_path: Option<String>,

    /// The host architecture [env: HOST_ARCH]
    #[arg(long, value_name = "ARCH")]
    host: Option<String>,

    /// The target architecture [env: TARGET_ARCH]
    #[arg(long, value_name = "ARCH")]
    target: Option<String>,

    /// The compiler to use [env: CC]
    #[arg(long)]
    cc: Option<String>,

    /// The linker to use [env: LD]
    #[arg(long)]
    ld: Option<String>,

    /// The archive creator to use [env: AR]
    #[arg(long)]
    ar: Option<String>,

    /// The system root to use. Default is / [env: SYSROOT]
    #[arg(long, value_name = "PATH")]
    sysroot: Option<String>,

    /// The swig executable to use [env: SWIG]
    #[arg(long)]
    swig: Option<String>,

    /// The perl executable to use [env: ECMDPERLBIN]
    #[arg(long)]
    perl: Option<String>,

    /// The perl include path to use [env: PERLINC]
    #[arg(long)]
    perlinc: Option<String>,

    /// The python executable to use [env: ECMDPYTHONBIN]
    #[arg(long)]
    python: Option<String>,

    /// The python include path to use [env: PYINC]
    #[arg(long)]
    pythoninc: Option<String>,

    /// The python3 executable to use [env: ECMDPYTHON3BIN]
    #[arg(long)]
    python3: Option<String>,

    /// The python3 include path to use [env: PY3INC]
    #[arg(long)]
    python3inc: Option<String>,

    /// The doxygen executable to use [env: DOXYGENBIN]
    #[arg(long)]
    doxygen: Option<String>,

    /// The location to place build output [env: OUTPUT_ROOT]
    #[arg(long, value_name = "PATH")]
    output_root: Option<String>,

    /// Filter down the list of extensions to build [env: EXTENSIONS]
    #[arg(long)]
    extensions: Option<String>,

    /// Other ecmd extension/plugin repos to include in build [env: ECMD_REPOS]
    #[arg(long)]
    ecmd_repos: Option<String>,

    /// Enable REMOVE_SIM in build [env: REMOVE_SIM]
    #[arg(long)]
    remove_sim: bool,

    /// Disable all swig actions, sets every CREATE_*API to no [env: WITHOUT_SWIG]
    #[arg(long)]
    without_swig: bool,

    /// Disable perl module build [env: CREATE_PERLAPI, WITHOUT_PERL]
    #[arg(long)]
    without_perl: bool,

    /// Disable python module build [env: CREATE_PYAPI, WITHOUT_PYTHON]
    #[arg(long)]
    without_python: bool,

    /// Disable python3 module build [env: CREATE_PY3API, WITHOUT_PYTHON3]
    #[arg(long)]
    without_python3: bool,

    /// Enable verbose messaging during builds, displays compiler calls etc. [env: VERBOSE]
    #[arg(long)]
    build_verbose: bool,
}

impl From<Cli> for Inputs {
    fn from(cli: Cli) -> Self {
        Inputs {
            pdbg_repo: cli.pdbg_repo,
            ecmd_repo: cli.ecmd_repo,
            install_path: cli.install_path,
            host: cli.host,
            target: cli.target,
            cc: cli.cc,
            ld: cli.ld,
            ar: cli.ar,
            sysroot: cli.sysroot,
            swig: cli.swig,
            perl: cli.perl,
            perlinc: cli.perlinc,
            python: cli.python,
            pythoninc: cli.pythoninc,
            python3: cli.python3,
            python3inc: cli.python3inc,
            doxygen: cli.doxygen,
            output_root: cli.output_root,
            extensions: cli.extensions,
            ecmd_repos: cli.ecmd_repos,
            remove_sim: cli.remove_sim,
            without_swig: cli.without_swig,
            without_perl: cli.without_perl,
            without_python: cli.without_python,
            without_python3: cli.without_python3,
            build_verbose: cli.build_verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    if let Err(e) = run(cli.into()) {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

fn run(mut inputs: Inputs) -> Result<()> {
    // Derived paths must stay valid when make includes the file from elsewhere
    inputs.pdbg_repo = fs::canonicalize(&inputs.pdbg_repo).with_context(|| {
        format!("pdbg repo not found at {}", inputs.pdbg_repo.display())
    })?;

    let config = resolve_config(&inputs, &Defaults::default(), &ProcessEnv)?;

    println!("Writing {}", config.output_path().display());
    write_config(&config).context("Could not write the build config")?;

    Ok(())
}
