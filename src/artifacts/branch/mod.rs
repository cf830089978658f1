pub mod branch_name;

/// Names git would refuse as ref names are refused here too
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Prefix of the ref files holding branch heads, relative to `.gitlet`
pub const REF_PREFIX: &str = "refs/heads/";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
