//! Persisting datasets as NumPy `.npy` files.
//!
//! Both arrays of a run are written next to their final names with a
//! `.partial` suffix and only renamed into place once both writes have
//! succeeded. A failed run leaves neither file behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use ndarray::Array4;
use ndarray_npy::write_npy;

use crate::error::SimError;

/// Locations of a written dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub data: PathBuf,
    pub acc: PathBuf,
}

impl DatasetPaths {
    /// `<dir>/<title>_data.npy` and `<dir>/<title>_acc.npy`
    pub fn new(dir: &Path, title: &str) -> Self {
        Self {
            data: dir.join(format!("{title}_data.npy")),
            acc: dir.join(format!("{title}_acc.npy")),
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SimError + '_ {
    move |source| SimError::Io { path: path.to_path_buf(), source }
}

/// Create `dir` and any missing parents. Existing directories are fine.
pub fn ensure_dir(dir: &Path) -> Result<(), SimError> {
    fs::create_dir_all(dir).map_err(io_err(dir))
}

fn array_to_disk(path: &Path, array: &Array4<f32>) -> Result<(), SimError> {
    write_npy(path, array).map_err(|source| SimError::Npy { path: path.to_path_buf(), source })
}

/// Write a trajectory/acceleration pair under `dir`
pub fn write_dataset(
    dir: &Path,
    title: &str,
    data: &Array4<f32>,
    acc: &Array4<f32>,
) -> Result<DatasetPaths, SimError> {
    ensure_dir(dir)?;
    let paths = DatasetPaths::new(dir, title);
    let data_tmp = partial_path(&paths.data);
    let acc_tmp = partial_path(&paths.acc);

    let mut data_in_place = false;
    let written = array_to_disk(&data_tmp, data)
        .and_then(|_| array_to_disk(&acc_tmp, acc))
        .and_then(|_| fs::rename(&data_tmp, &paths.data).map_err(io_err(&paths.data)))
        .and_then(|_| {
            data_in_place = true;
            fs::rename(&acc_tmp, &paths.acc).map_err(io_err(&paths.acc))
        });

    if let Err(e) = written {
        // best effort, the write error is what gets reported
        let _ = fs::remove_file(&data_tmp);
        let _ = fs::remove_file(&acc_tmp);
        // a new data file next to an old acc file would be a mismatched pair
        if data_in_place {
            let _ = fs::remove_file(&paths.data);
            let _ = fs::remove_file(&paths.acc);
        }
        return Err(e);
    }

    info!("wrote {} and {}", paths.data.display(), paths.acc.display());
    Ok(paths)
}
