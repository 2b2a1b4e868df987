use crate::entitys::profile_entity::{Employee, EducationView, KeymanData, ProfileView, ProjectView, SkillsView};
use anyhow::{Context, Result};
use common::errors::AppError;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// 员工 ID 前缀，如 `KEYMAN012`
pub const KEYMAN_PREFIX: &str = "KEYMAN";
/// 数字编号不小于该值的员工使用外部随机头像
const RANDOM_PORTRAIT_FROM: u32 = 5;

/// 员工资料参考数据集（启动时加载，只读）
#[derive(Debug, Default)]
pub struct ProfileService {
    employees: HashMap<String, Employee>,
}

impl ProfileService {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let data: KeymanData = serde_json::from_str(raw).context("invalid keyman dataset")?;
        let employees = data.employees.into_iter().map(|e| (e.id.clone(), e)).collect();
        Ok(Self { employees })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let service = Self::from_json_str(&raw)?;
        info!("[ProfileService] 加载 {} 份员工资料: {}", service.len(), path.display());
        Ok(service)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn find(&self, id: &str) -> Result<&Employee, AppError> {
        self.employees.get(id).ok_or(AppError::NotFound)
    }

    pub fn view(&self, id: &str) -> Result<ProfileView, AppError> {
        self.find(id).map(to_view)
    }
}

/// `KEYMAN012` → 12
pub fn numeric_id(id: &str) -> Option<u32> {
    id.strip_prefix(KEYMAN_PREFIX).unwrap_or(id).parse().ok()
}

pub fn profile_image_url(id: &str) -> String {
    match numeric_id(id) {
        Some(n) if n >= RANDOM_PORTRAIT_FROM => format!("https://randomuser.me/api/portraits/men/{}.jpg", n),
        _ => format!("/images/{}.jpg", id),
    }
}

fn to_view(employee: &Employee) -> ProfileView {
    let education = employee
        .edu_bg
        .first()
        .map(|edu| EducationView { degree: edu.degree.clone(), major: edu.major.clone(), graduated_at: edu.date_awarded.clone() })
        .unwrap_or_default();

    ProfileView {
        id: employee.id.clone(),
        name: employee.personal_info.name.clone(),
        position: employee.professional_info.position.clone(),
        company: employee.professional_info.company.clone(),
        location: employee.personal_info.location.clone(),
        phone: employee.personal_info.mphone.clone(),
        email: employee.personal_info.email.clone(),
        department: employee.professional_info.department.clone(),
        education,
        experience_years: employee.professional_info.years_of_experience,
        projects: employee
            .work_exps
            .iter()
            .map(|exp| ProjectView { name: exp.name.clone(), period: format!("{} - {}", exp.duration_from, exp.duration_to) })
            .collect(),
        skills: SkillsView {
            main: employee.skills.soft.clone(),
            technical: employee.skills.technical.iter().map(|t| t.name.clone()).collect(),
        },
        certifications: employee.skills.certifications.iter().map(|c| c.name.clone()).collect(),
        image_url: profile_image_url(&employee.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "employees": [{
            "id": "KEYMAN007",
            "personalInfo": {"name": "Choi", "email": "choi@posco.com", "mphone": "010-1111-2222", "dphone": "02-333", "location": "Pohang"},
            "eduBg": [{"degree": "MS", "major": "Computer Science", "date_awarded": "2015-02"}],
            "professionalInfo": {"company": "POSCO DX", "department": "Robotics", "position": "Lead", "yearsOfExperience": 12},
            "skills": {
                "technical": [{"name": "ROS", "proficiency": "expert"}],
                "soft": ["Leadership"],
                "certifications": [{"name": "PMP", "issueDate": "2020", "expiryDate": "2026"}]
            },
            "workExps": [{"name": "Mobile robot SW", "duration_from": "2019", "duration_to": "2023"}]
        }, {
            "id": "KEYMAN002",
            "personalInfo": {"name": "Ahn"}
        }]
    }"#;

    #[test]
    fn view_flattens_employee() {
        let service = ProfileService::from_json_str(DATASET).unwrap();
        assert_eq!(service.len(), 2);

        let view = service.view("KEYMAN007").unwrap();
        assert_eq!(view.name, "Choi");
        assert_eq!(view.phone, "010-1111-2222");
        assert_eq!(view.education.graduated_at, "2015-02");
        assert_eq!(view.experience_years, 12);
        assert_eq!(view.projects[0].period, "2019 - 2023");
        assert_eq!(view.skills.main, vec!["Leadership"]);
        assert_eq!(view.skills.technical, vec!["ROS"]);
        assert_eq!(view.certifications, vec!["PMP"]);
        assert_eq!(view.image_url, "https://randomuser.me/api/portraits/men/7.jpg");
    }

    #[test]
    fn sparse_employee_uses_defaults() {
        let service = ProfileService::from_json_str(DATASET).unwrap();
        let view = service.view("KEYMAN002").unwrap();
        assert_eq!(view.education, EducationView::default());
        assert!(view.projects.is_empty());
        assert_eq!(view.image_url, "/images/KEYMAN002.jpg");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let service = ProfileService::from_json_str(DATASET).unwrap();
        assert!(matches!(service.view("KEYMAN999"), Err(AppError::NotFound)));
    }

    #[test]
    fn numeric_id_parsing() {
        assert_eq!(numeric_id("KEYMAN012"), Some(12));
        assert_eq!(numeric_id("42"), Some(42));
        assert_eq!(numeric_id("KEYMANX"), None);
    }
}
