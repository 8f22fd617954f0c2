//! Build configuration resolution.
//!
//! Turns command-line inputs, the environment, and [`Defaults`] into the
//! [`SettingsTable`] written to `makefile.config`.
//!
//! # Example
//!
//! ```rust
//! use pdbg_config::config::{resolve_config, Defaults, Inputs};
//! use pdbg_config::resolve::MapEnv;
//!
//! let inputs = Inputs {
//!     target: Some("ppc64".into()),
//!     ..Inputs::new("/r/pdbg", "/r/ecmd")
//! };
//! let config = resolve_config(&inputs, &Defaults::default(), &MapEnv::new()).unwrap();
//!
//! assert_eq!(config.settings.get("TARGET_BARCH"), Some("ppc"));
//! assert_eq!(config.output_path(), std::path::Path::new("/r/pdbg/makefile.config"));
//! ```

use std::path::{Path, PathBuf};

use crate::arch::{self, ArchFlags};
use crate::error::Result;
use crate::resolve::{flag, resolve, resolve_optional, EnvLookup};
use crate::settings::SettingsTable;

/// Default compiler, also used as the linker.
pub const DEFAULT_CC: &str = "/usr/bin/g++";
/// Default archiver.
pub const DEFAULT_AR: &str = "/usr/bin/ar";
/// Default system root.
pub const DEFAULT_SYSROOT: &str = "/";
/// Make prefix that silences recipe echo.
pub const DEFAULT_VERBOSE: &str = "@";
/// Default name of the generated file.
pub const DEFAULT_CONFIG_NAME: &str = "makefile.config";

/// Environment variable that overrides the generated file name.
pub const CONFIG_NAME_ENV: &str = "MAKEFILE_CONFIG_NAME";

/// Static fallbacks used when neither an argument nor the environment
/// supplies a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub cc: String,
    pub ld: String,
    pub ar: String,
    pub sysroot: String,
    pub verbose: String,
    pub config_name: String,
    /// Machine name of the host, used for `HOST_ARCH`.
    pub host_machine: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            cc: DEFAULT_CC.to_string(),
            ld: DEFAULT_CC.to_string(),
            ar: DEFAULT_AR.to_string(),
            sysroot: DEFAULT_SYSROOT.to_string(),
            verbose: DEFAULT_VERBOSE.to_string(),
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            host_machine: arch::host_machine(),
        }
    }
}

/// Explicit inputs, usually straight from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    /// Root of the pdbg repo. Anchors the derived paths and the output file.
    pub pdbg_repo: PathBuf,
    /// Root of the eCMD repo to build against.
    pub ecmd_repo: PathBuf,

    pub install_path: Option<String>,
    pub host: Option<String>,
    pub target: Option<String>,
    pub cc: Option<String>,
    pub ld: Option<String>,
    pub ar: Option<String>,
    pub sysroot: Option<String>,
    pub swig: Option<String>,
    pub perl: Option<String>,
    pub perlinc: Option<String>,
    pub python: Option<String>,
    pub pythoninc: Option<String>,
    pub python3: Option<String>,
    pub python3inc: Option<String>,
    pub doxygen: Option<String>,
    pub output_root: Option<String>,
    pub extensions: Option<String>,
    pub ecmd_repos: Option<String>,

    pub remove_sim: bool,
    pub without_swig: bool,
    pub without_perl: bool,
    pub without_python: bool,
    pub without_python3: bool,
    pub build_verbose: bool,
}

impl Inputs {
    /// Optional tool locations as (setting name, explicit value).
    ///
    /// These are only emitted when given, since nothing probes for them.
    pub fn optional_tools(&self) -> [(&'static str, Option<&str>); 10] {
        [
            ("SWIG", self.swig.as_deref()),
            ("ECMDPERLBIN", self.perl.as_deref()),
            ("PERLINC", self.perlinc.as_deref()),
            ("ECMDPYTHONBIN", self.python.as_deref()),
            ("PYINC", self.pythoninc.as_deref()),
            ("ECMDPYTHON3BIN", self.python3.as_deref()),
            ("PY3INC", self.python3inc.as_deref()),
            ("DOXYGENBIN", self.doxygen.as_deref()),
            ("EXTENSIONS", self.extensions.as_deref()),
            ("ECMD_REPOS", self.ecmd_repos.as_deref()),
        ]
    }

    /// Inputs with only the two required repos set.
    pub fn new(pdbg_repo: impl Into<PathBuf>, ecmd_repo: impl Into<PathBuf>) -> Self {
        Self {
            pdbg_repo: pdbg_repo.into(),
            ecmd_repo: ecmd_repo.into(),
            ..Default::default()
        }
    }
}

/// Fully resolved configuration, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory the config file is written to.
    pub root: PathBuf,
    /// Name of the config file inside `root`.
    pub file_name: String,
    pub settings: SettingsTable,
}

impl BuildConfig {
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }
}

/// Resolve every setting.
///
/// Fails before anything touches the disk if the target architecture
/// family is not supported.
pub fn resolve_config(inputs: &Inputs, defaults: &Defaults, env: &dyn EnvLookup) -> Result<BuildConfig> {
    let mut settings = SettingsTable::new();

    let root = path_string(&inputs.pdbg_repo);
    settings.insert("PDBG_ROOT", root.as_str())?;
    settings.insert("ECMD_ROOT", path_string(&inputs.ecmd_repo))?;

    println!("Determining host and distro..");

    let host_arch = resolve("HOST_ARCH", inputs.host.as_deref(), env, || {
        defaults.host_machine.clone()
    })
    .value;
    settings.insert("HOST_BARCH", arch::barch(&host_arch))?;

    let target_arch = resolve("TARGET_ARCH", inputs.target.as_deref(), env, || host_arch.clone()).value;
    settings.insert("TARGET_BARCH", arch::barch(&target_arch))?;
    settings.insert("HOST_ARCH", host_arch)?;

    println!("Establishing output locations..");

    let output_root = resolve("OUTPUT_ROOT", inputs.output_root.as_deref(), env, || {
        join(&root, "build")
    })
    .value;

    // Trailing slash keeps the make .C -> .o rules happy
    let objpath = format!("{}/", join(&output_root, &format!("obj_{}", target_arch)));
    let outpath = join(&output_root, &format!("out_{}", target_arch));
    settings.insert("OUTBIN", join(&outpath, "bin"))?;
    settings.insert("OUTLIB", join(&outpath, "lib"))?;
    settings.insert("OUTPATH", outpath)?;
    settings.insert("OUTPUT_ROOT", output_root)?;

    println!("Establishing compiler locations..");

    let cc = resolve("CC", inputs.cc.as_deref(), env, || defaults.cc.clone());
    settings.insert("CC", cc.value)?;
    let ld = resolve("LD", inputs.ld.as_deref(), env, || defaults.ld.clone());
    settings.insert("LD", ld.value)?;
    let ar = resolve("AR", inputs.ar.as_deref(), env, || defaults.ar.clone());
    settings.insert("AR", ar.value)?;
    let sysroot = resolve("SYSROOT", inputs.sysroot.as_deref(), env, || defaults.sysroot.clone());
    settings.insert("SYSROOT", sysroot.value)?;

    println!("Establishing compiler options..");

    let flags = ArchFlags::for_target(&target_arch)?;

    let mut defines = resolve("DEFINES", None, env, String::new).value;
    defines.push_str(" -DLINUX");
    if flag("REMOVE_SIM", inputs.remove_sim, env) {
        defines.push_str(" -DREMOVE_SIM");
    }
    settings.insert("DEFINES", defines)?;
    settings.insert("GPATH", format!(" {}", objpath))?;
    settings.insert("OBJPATH", objpath)?;
    settings.insert("CFLAGS", format!("-g -I.{}", flags.cflags))?;
    settings.insert("LDFLAGS", flags.ldflags)?;
    settings.insert("SLDFLAGS", flags.sldflags)?;
    settings.insert("TARGET_ARCH", target_arch)?;

    let without_swig = flag("WITHOUT_SWIG", inputs.without_swig, env);
    let language_apis = [
        ("CREATE_PERLAPI", "WITHOUT_PERL", inputs.without_perl),
        ("CREATE_PYAPI", "WITHOUT_PYTHON", inputs.without_python),
        ("CREATE_PY3API", "WITHOUT_PYTHON3", inputs.without_python3),
    ];
    for (setting, disable_var, switch) in language_apis {
        let disabled = without_swig || flag(disable_var, switch, env);
        let create = resolve(setting, disabled.then_some("no"), env, || "yes".to_string());
        settings.insert(setting, create.value)?;
    }

    for (name, explicit) in inputs.optional_tools() {
        if let Some(tool) = resolve_optional(name, explicit, env) {
            settings.insert(name, tool.value)?;
        }
    }

    // The verbose switch wins outright; it clears the prefix
    let verbose = if inputs.build_verbose {
        String::new()
    } else {
        resolve("VERBOSE", None, env, || defaults.verbose.clone()).value
    };
    settings.insert("VERBOSE", verbose)?;

    let install_path = resolve("INSTALL_PATH", inputs.install_path.as_deref(), env, || {
        join(&root, "install")
    });
    settings.insert("INSTALL_PATH", install_path.value)?;

    let file_name = resolve(CONFIG_NAME_ENV, None, env, || defaults.config_name.clone()).value;

    Ok(BuildConfig {
        root: inputs.pdbg_repo.clone(),
        file_name,
        settings,
    })
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn join(base: &str, segment: &str) -> String {
    path_string(&Path::new(base).join(segment))
}
