//! Integer-coded kernel options.

use std::os::raw::c_int;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MarshalError;

/// Which part of the mesh to delete inside a polygon.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeleteMeshOption {
    /// Delete all nodes inside the polygon.
    AllNodes = 0,
    /// Delete all faces whose circumcenter is inside the polygon.
    AllFaceCircumcenters = 1,
    /// Delete all faces that lie completely inside the polygon.
    AllCompleteFaces = 2,
}

/// How to project onto the land boundary.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectToLandBoundaryOption {
    DoNotProjectToLandboundary = 0,
    ToOriginalNetboundary = 1,
    OuterMeshBoundaryToLandboundary = 2,
    InnerAndOuterMeshBoundaryToLandboundary = 3,
    WholeMesh = 4,
}

impl From<DeleteMeshOption> for c_int {
    fn from(o: DeleteMeshOption) -> c_int {
        o as c_int
    }
}

impl TryFrom<c_int> for DeleteMeshOption {
    type Error = MarshalError;

    fn try_from(value: c_int) -> Result<Self, MarshalError> {
        match value {
            0 => Ok(Self::AllNodes),
            1 => Ok(Self::AllFaceCircumcenters),
            2 => Ok(Self::AllCompleteFaces),
            _ => Err(MarshalError::InvalidOption {
                kind: "DeleteMeshOption",
                value,
            }),
        }
    }
}

impl From<ProjectToLandBoundaryOption> for c_int {
    fn from(o: ProjectToLandBoundaryOption) -> c_int {
        o as c_int
    }
}

impl TryFrom<c_int> for ProjectToLandBoundaryOption {
    type Error = MarshalError;

    fn try_from(value: c_int) -> Result<Self, MarshalError> {
        match value {
            0 => Ok(Self::DoNotProjectToLandboundary),
            1 => Ok(Self::ToOriginalNetboundary),
            2 => Ok(Self::OuterMeshBoundaryToLandboundary),
            3 => Ok(Self::InnerAndOuterMeshBoundaryToLandboundary),
            4 => Ok(Self::WholeMesh),
            _ => Err(MarshalError::InvalidOption {
                kind: "ProjectToLandBoundaryOption",
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(DeleteMeshOption, c_int);
    assert_eq_size!(ProjectToLandBoundaryOption, c_int);

    #[test]
    fn delete_option_codes() {
        assert_eq!(c_int::from(DeleteMeshOption::AllNodes), 0);
        assert_eq!(c_int::from(DeleteMeshOption::AllCompleteFaces), 2);
        for code in 0..3 {
            let o = DeleteMeshOption::try_from(code).unwrap();
            assert_eq!(c_int::from(o), code);
        }
    }

    #[test]
    fn project_option_codes() {
        for code in 0..5 {
            let o = ProjectToLandBoundaryOption::try_from(code).unwrap();
            assert_eq!(c_int::from(o), code);
        }
        assert_eq!(
            ProjectToLandBoundaryOption::try_from(5),
            Err(MarshalError::InvalidOption {
                kind: "ProjectToLandBoundaryOption",
                value: 5
            })
        );
    }

    #[test]
    fn rejects_negative_code() {
        assert!(DeleteMeshOption::try_from(-1).is_err());
    }
}
