//! # SCF 输入生成
//!
//! 由结构、代码名和赝势族生成一次 pw.x SCF 计算的完整输入。
//!
//! ## 依赖关系
//! - 被 `workflow/eos.rs` 调用
//! - 使用 `models/calculation.rs`, `utils/files.rs`

use crate::error::{EosError, Result};
use crate::models::{
    CalculationInputs, CodeId, Crystal, KpointMesh, Pseudopotential, ScfParameters,
    SchedulerOptions,
};
use crate::utils::files::FileCollector;

use std::path::{Path, PathBuf};

/// SCF 使用的 k 点网格密度
const KPOINTS_MESH: u32 = 2;

/// 赝势库：`<root>/<family>/` 下每个元素一个 UPF 文件
#[derive(Debug, Clone)]
pub struct PseudoLibrary {
    root: PathBuf,
}

impl PseudoLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PseudoLibrary { root: root.into() }
    }

    /// 赝势族目录
    pub fn family_dir(&self, family: &str) -> PathBuf {
        self.root.join(family)
    }

    /// 为结构中的每种元素查找赝势文件
    pub fn get_pseudos(&self, structure: &Crystal, family: &str) -> Result<Vec<Pseudopotential>> {
        let family_dir = self.family_dir(family);
        if !family_dir.is_dir() {
            return Err(EosError::DirectoryNotFound {
                path: family_dir.display().to_string(),
            });
        }

        structure
            .species()
            .into_iter()
            .map(|element| find_pseudo(&family_dir, family, element))
            .collect()
    }
}

fn find_pseudo(family_dir: &Path, family: &str, element: &str) -> Result<Pseudopotential> {
    let el = element.to_lowercase();
    let pattern = format!("{el}.upf,{el}.*.upf,{el}_*.upf,{el}-*.upf");

    let file = FileCollector::new(family_dir)
        .with_pattern(&pattern)?
        .collect()
        .into_iter()
        .next()
        .ok_or_else(|| EosError::PseudoNotFound {
            element: element.to_string(),
            family: family.to_string(),
            path: family_dir.display().to_string(),
        })?;

    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(Pseudopotential {
        element: element.to_string(),
        filename,
    })
}

/// 生成 SCF 计算输入
pub fn generate_scf_input_params(
    structure: Crystal,
    codename: &str,
    pseudo_family: &str,
    pseudos: &PseudoLibrary,
) -> Result<CalculationInputs> {
    let code = CodeId::parse(codename)?;
    let pseudo_files = pseudos.get_pseudos(&structure, pseudo_family)?;

    Ok(CalculationInputs {
        code,
        pseudo_family: pseudo_family.to_string(),
        pseudo_dir: pseudos.family_dir(pseudo_family),
        pseudos: pseudo_files,
        structure,
        parameters: ScfParameters::default(),
        kpoints: KpointMesh::uniform(KPOINTS_MESH),
        options: SchedulerOptions::default(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::structures::create_diamond_fcc;
    use std::fs;

    /// 建立含 Si/Ge/C 赝势的临时赝势库
    pub(crate) fn pseudo_library() -> (tempfile::TempDir, PseudoLibrary) {
        let dir = tempfile::tempdir().unwrap();
        let family = dir.path().join("GBRV_lda");
        fs::create_dir_all(&family).unwrap();
        fs::write(family.join("si_lda_v1.uspp.F.UPF"), "").unwrap();
        fs::write(family.join("Ge.pz-dn-rrkjus.UPF"), "").unwrap();
        fs::write(family.join("C.UPF"), "").unwrap();
        let library = PseudoLibrary::new(dir.path());
        (dir, library)
    }

    #[test]
    fn test_generate_scf_input_params() {
        let (_dir, library) = pseudo_library();
        let si = create_diamond_fcc("Si").unwrap();

        let inputs =
            generate_scf_input_params(si.clone(), "qe-pw-6.2.1@localhost", "GBRV_lda", &library)
                .unwrap();

        assert_eq!(inputs.code.label, "qe-pw-6.2.1");
        assert_eq!(inputs.pseudo_family, "GBRV_lda");
        assert_eq!(inputs.structure, si);
        assert_eq!(inputs.kpoints.mesh, [2, 2, 2]);
        assert_eq!(inputs.pseudos.len(), 1);
        assert_eq!(inputs.pseudos[0].element, "Si");
        assert_eq!(inputs.pseudos[0].filename, "si_lda_v1.uspp.F.UPF");
        assert!(inputs.pseudo_dir.ends_with("GBRV_lda"));
    }

    #[test]
    fn test_pseudo_patterns() {
        let (_dir, library) = pseudo_library();

        let ge = create_diamond_fcc("Ge").unwrap();
        let pseudos = library.get_pseudos(&ge, "GBRV_lda").unwrap();
        assert_eq!(pseudos[0].filename, "Ge.pz-dn-rrkjus.UPF");

        let c = create_diamond_fcc("C").unwrap();
        let pseudos = library.get_pseudos(&c, "GBRV_lda").unwrap();
        assert_eq!(pseudos[0].filename, "C.UPF");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_pseudo() {
        let (dir, library) = pseudo_library();
        let family = dir.path().join("GBRV_lda");
        let shared = dir.path().join("shared");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("sn_lda_v1.4.uspp.F.UPF"), "").unwrap();
        std::os::unix::fs::symlink(
            shared.join("sn_lda_v1.4.uspp.F.UPF"),
            family.join("sn_lda_v1.4.uspp.F.UPF"),
        )
        .unwrap();

        let sn = create_diamond_fcc("Sn").unwrap();
        let pseudos = library.get_pseudos(&sn, "GBRV_lda").unwrap();
        assert_eq!(pseudos[0].filename, "sn_lda_v1.4.uspp.F.UPF");
    }

    #[test]
    fn test_missing_pseudo() {
        let (_dir, library) = pseudo_library();
        let sn = create_diamond_fcc("Sn").unwrap();

        match library.get_pseudos(&sn, "GBRV_lda") {
            Err(EosError::PseudoNotFound {
                element, family, ..
            }) => {
                assert_eq!(element, "Sn");
                assert_eq!(family, "GBRV_lda");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_family() {
        let (_dir, library) = pseudo_library();
        let si = create_diamond_fcc("Si").unwrap();

        assert!(matches!(
            library.get_pseudos(&si, "SSSP"),
            Err(EosError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_codename() {
        let (_dir, library) = pseudo_library();
        let si = create_diamond_fcc("Si").unwrap();

        assert!(matches!(
            generate_scf_input_params(si, "pw.x", "GBRV_lda", &library),
            Err(EosError::InvalidCodename(_))
        ));
    }
}
