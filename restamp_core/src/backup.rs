use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::RestampError;
use crate::RestampResult;

/// The sibling path where the pre-transaction copy of `path` lives.
pub fn backup_path(path: &Path) -> PathBuf {
	let mut name = path.as_os_str().to_os_string();
	name.push(".bak");
	PathBuf::from(name)
}

/// Create the backup copy for `path`, returning the backup's path.
///
/// If the backup already exists it is left untouched: a leftover backup
/// means a previous run was interrupted, and its content is the pristine
/// pre-transaction state the next run must recover from. Overwriting it
/// with the possibly half-rewritten live file would destroy that recovery
/// point.
pub fn create_backup(path: &Path) -> RestampResult<PathBuf> {
	let backup = backup_path(path);

	if backup.exists() {
		debug!(backup = %backup.display(), "reusing existing backup");
		return Ok(backup);
	}

	std::fs::copy(path, &backup).map_err(|source| RestampError::file_access(path, source))?;
	debug!(backup = %backup.display(), "created backup");

	Ok(backup)
}

/// Remove the backup for `path` after a completed transaction.
///
/// The caller decides how to surface a removal failure; by the time this
/// runs the live file has already been rewritten, so failure here must not
/// unwind the transaction.
pub fn delete_backup(path: &Path) -> std::io::Result<()> {
	let backup = backup_path(path);
	std::fs::remove_file(&backup)?;
	debug!(backup = %backup.display(), "removed backup");
	Ok(())
}
