//! 课程目录：niveau → sous-niveau → matière
//!
//! 静态数据，添加课程时只接受目录中存在的组合；班级的 level 必须是已知的 sous-niveau。

/// 目录中的一项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub niveau: &'static str,
    pub sous_niveau: &'static str,
    pub matiere: &'static str,
    pub coefficient: f64,
}

impl CatalogEntry {
    /// 科目唯一编码，如 `6EME-MATHEMATIQUES`
    pub fn subject_code(&self) -> String {
        format!("{}-{}", fold_code(self.sous_niveau), fold_code(self.matiere))
    }

    pub fn subject_description(&self) -> String {
        format!("{} - {} ({})", self.matiere, self.sous_niveau, self.niveau)
    }
}

struct NiveauDef {
    niveau: &'static str,
    groups: &'static [(&'static [&'static str], &'static [(&'static str, f64)])],
}

const PRIMAIRE: &[(&str, f64)] = &[
    ("Français", 3.0),
    ("Mathématiques", 3.0),
    ("Sciences", 1.0),
    ("Histoire-Géographie", 1.0),
    ("Anglais", 1.0),
    ("Éducation civique", 1.0),
    ("Arts plastiques", 1.0),
    ("EPS", 1.0),
];

const COLLEGE: &[(&str, f64)] = &[
    ("Français", 4.0),
    ("Mathématiques", 4.0),
    ("Anglais", 2.0),
    ("Histoire-Géographie", 3.0),
    ("SVT", 2.0),
    ("Physique-Chimie", 2.0),
    ("Technologie", 1.0),
    ("Arts plastiques", 1.0),
    ("Éducation musicale", 1.0),
    ("EPS", 1.0),
];

const LYCEE: &[(&str, f64)] = &[
    ("Français", 3.0),
    ("Mathématiques", 4.0),
    ("Physique-Chimie", 3.0),
    ("SVT", 2.0),
    ("Histoire-Géographie", 2.0),
    ("Anglais", 2.0),
    ("Espagnol", 2.0),
    ("EPS", 1.0),
];

const TERMINALE: &[(&str, f64)] = &[
    ("Philosophie", 3.0),
    ("Mathématiques", 5.0),
    ("Physique-Chimie", 4.0),
    ("SVT", 3.0),
    ("Histoire-Géographie", 2.0),
    ("Anglais", 2.0),
    ("Espagnol", 2.0),
    ("EPS", 1.0),
];

static CATALOG: &[NiveauDef] = &[
    NiveauDef {
        niveau: "Primaire",
        groups: &[(&["CP", "CE1", "CE2", "CM1", "CM2"], PRIMAIRE)],
    },
    NiveauDef {
        niveau: "Collège",
        groups: &[(&["6ème", "5ème", "4ème", "3ème"], COLLEGE)],
    },
    NiveauDef {
        niveau: "Lycée",
        groups: &[(&["2nde", "1ère"], LYCEE), (&["Terminale"], TERMINALE)],
    },
];

/// 目录中全部条目
pub fn entries() -> impl Iterator<Item = CatalogEntry> {
    CATALOG.iter().flat_map(|def| {
        def.groups.iter().flat_map(move |(sous_niveaux, matieres)| {
            sous_niveaux.iter().flat_map(move |sous| {
                matieres.iter().map(move |(matiere, coefficient)| CatalogEntry {
                    niveau: def.niveau,
                    sous_niveau: sous,
                    matiere,
                    coefficient: *coefficient,
                })
            })
        })
    })
}

pub fn niveaux() -> Vec<&'static str> {
    CATALOG.iter().map(|def| def.niveau).collect()
}

/// 未知 niveau 返回空列表
pub fn sous_niveaux(niveau: &str) -> Vec<&'static str> {
    CATALOG
        .iter()
        .filter(|def| def.niveau == niveau)
        .flat_map(|def| def.groups.iter().flat_map(|(sous, _)| sous.iter().copied()))
        .collect()
}

pub fn matieres(niveau: &str, sous_niveau: &str) -> Vec<CatalogEntry> {
    entries()
        .filter(|e| e.niveau == niveau && e.sous_niveau == sous_niveau)
        .collect()
}

pub fn find(niveau: &str, sous_niveau: &str, matiere: &str) -> Option<CatalogEntry> {
    entries().find(|e| e.niveau == niveau && e.sous_niveau == sous_niveau && e.matiere == matiere)
}

/// 由 sous-niveau 反查 niveau
pub fn niveau_of(sous_niveau: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|def| def.groups.iter().any(|(sous, _)| sous.contains(&sous_niveau)))
        .map(|def| def.niveau)
}

pub fn is_known_sous_niveau(sous_niveau: &str) -> bool {
    niveau_of(sous_niveau).is_some()
}

/// 去掉重音并转为大写，非字母数字字符折叠为单个 '-'
fn fold_code(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        let mapped = match c {
            'à' | 'â' | 'ä' | 'À' | 'Â' => 'A',
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' => 'E',
            'î' | 'ï' | 'Î' => 'I',
            'ô' | 'ö' | 'Ô' => 'O',
            'ù' | 'û' | 'ü' | 'Û' => 'U',
            'ç' | 'Ç' => 'C',
            c if c.is_ascii_alphanumeric() => c.to_ascii_uppercase(),
            _ => '-',
        };
        if mapped == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(mapped);
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_niveaux_in_order() {
        assert_eq!(niveaux(), vec!["Primaire", "Collège", "Lycée"]);
    }

    #[test]
    fn test_sous_niveaux() {
        assert_eq!(sous_niveaux("Collège"), vec!["6ème", "5ème", "4ème", "3ème"]);
        assert_eq!(sous_niveaux("Lycée"), vec!["2nde", "1ère", "Terminale"]);
        assert!(sous_niveaux("Université").is_empty());
    }

    #[test]
    fn test_matieres_and_find() {
        let list = matieres("Lycée", "Terminale");
        assert!(list.iter().any(|e| e.matiere == "Philosophie"));
        assert!(!list.iter().any(|e| e.matiere == "Français"));

        let entry = find("Collège", "6ème", "Mathématiques").expect("entry");
        assert_eq!(entry.coefficient, 4.0);
        assert!(find("Collège", "CP", "Mathématiques").is_none());
        assert!(find("Primaire", "CP", "Philosophie").is_none());
    }

    #[test]
    fn test_niveau_of() {
        assert_eq!(niveau_of("CM2"), Some("Primaire"));
        assert_eq!(niveau_of("Terminale"), Some("Lycée"));
        assert_eq!(niveau_of("Licence"), None);
        assert!(is_known_sous_niveau("4ème"));
    }

    #[test]
    fn test_subject_code() {
        let entry = find("Collège", "6ème", "Histoire-Géographie").expect("entry");
        assert_eq!(entry.subject_code(), "6EME-HISTOIRE-GEOGRAPHIE");
        let entry = find("Primaire", "CE1", "Éducation civique").expect("entry");
        assert_eq!(entry.subject_code(), "CE1-EDUCATION-CIVIQUE");
    }
}
