//! Shared constants: label keys, stage names, well-known paths.

/// Vendor name stamped into every label map.
pub const VENDOR: &str = "stratum";

/// Label key for the vendor tag.
pub const LABEL_VENDOR: &str = "io.stratum.vendor";

/// Label key for the JSON-serialized system package list.
pub const LABEL_SYSTEM_PACKAGES: &str = "io.stratum.packages.system";

/// Label key for the JSON-serialized PyPI package list.
pub const LABEL_PYPI_PACKAGES: &str = "io.stratum.packages.pypi";

/// Label key for the JSON-serialized R package list.
pub const LABEL_R_PACKAGES: &str = "io.stratum.packages.r";

/// Label key for the GPU flag; present only when a CUDA version is declared.
pub const LABEL_GPU: &str = "io.stratum.gpu";

/// Label key for the CUDA toolkit version.
pub const LABEL_CUDA: &str = "io.stratum.cuda.version";

/// Label key for the CUDNN version; present only alongside a CUDA version.
pub const LABEL_CUDNN: &str = "io.stratum.cudnn.version";

/// CUDNN major version assumed when CUDA is requested without one.
pub const DEFAULT_CUDNN: &str = "8";

/// Root of the conda installation inside images.
pub const CONDA_ROOT: &str = "/opt/conda";

/// CRAN mirror used for R package installs.
pub const CRAN_MIRROR: &str = "https://cran.r-project.org";

/// Default prefix for persistent cache mount ids.
pub const DEFAULT_CACHE_PREFIX: &str = "stratum";

/// Truncated length of plan op digests.
pub const OP_DIGEST_LEN: usize = 20;

// Stage names, attached to progress events and to stage failures.
pub const STAGE_BASE: &str = "base image";
pub const STAGE_SYSTEM: &str = "install system packages";
pub const STAGE_CHANNEL: &str = "configure conda channel";
pub const STAGE_PYPI_INDEX: &str = "configure pypi index";
pub const STAGE_SSH: &str = "install ssh keys";
pub const STAGE_SHELL: &str = "configure shell";
pub const STAGE_CONDA: &str = "install conda packages";
pub const STAGE_PYPI: &str = "install pypi packages";
pub const STAGE_R: &str = "install r packages";
pub const STAGE_EDITOR: &str = "install editor extensions";
pub const STAGE_MERGE: &str = "merge environment layers";
pub const STAGE_RUN: &str = "run commands";
pub const STAGE_GIT: &str = "configure version control";
