/*!
Subcommand dispatch surface. Module declarations and re-exports only.

Layout:
  src/cmd/
    mod.rs      (this file)
    shared.rs   Context (config, project dir, batch/quiet), count parsing
    format.rs   color / heading / table helpers for human output
    run.rs      install | dev | test | build | clear
    custom.rs   any other verb (project, then global mapping)
    init.rs     interactive setup of the built-in verbs
    map.rs      store a mapping (project or global, or from a file)
    list.rs     show mappings and suggestions
    git.rs      fetch | status | branch | log | reset
    clone.rs    git clone + open in editor

Conventions:
  - Each subcommand module exposes `execute_*` returning `anyhow::Result<()>`.
  - Argument structs derive `clap::Args` and are kept minimal.
  - Anything touching the config goes through `shared::Context`.
*/

pub mod clone;
pub mod custom;
pub mod format;
pub mod git;
pub mod init;
pub mod list;
pub mod map;
pub mod run;
pub mod shared;

pub use clone::{CloneArgs, execute_clone};
pub use custom::execute_custom;
pub use git::{
    BranchArgs, LogArgs, ResetArgs, execute_branch, execute_fetch, execute_log, execute_reset,
    execute_status,
};
pub use init::execute_init;
pub use list::{ListArgs, execute_list};
pub use map::{MapArgs, execute_map};
pub use run::{ClearArgs, InstallArgs, RunArgs, execute_clear, execute_install, execute_run};
pub use shared::Context;
