use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 员工资料数据集根节点（`{"employees": [...]}`）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct KeymanData {
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: String,
    pub personal_info: PersonalInfo,
    pub edu_bg: Vec<Education>,
    pub professional_info: ProfessionalInfo,
    pub skills: Skills,
    pub work_exps: Vec<WorkExperience>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub mphone: String,
    pub dphone: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub major: String,
    pub date_awarded: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfessionalInfo {
    pub company: String,
    pub department: String,
    pub position: String,
    pub years_of_experience: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Skills {
    pub main: Vec<String>,
    pub technical: Vec<TechnicalSkill>,
    pub soft: Vec<String>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TechnicalSkill {
    pub name: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issue_date: String,
    pub expiry_date: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WorkExperience {
    pub name: String,
    pub duration_from: String,
    pub duration_to: String,
}

/// 资料页展示结构
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub position: String,
    pub company: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub education: EducationView,
    pub experience_years: u32,
    pub projects: Vec<ProjectView>,
    pub skills: SkillsView,
    pub certifications: Vec<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationView {
    pub degree: String,
    pub major: String,
    pub graduated_at: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct ProjectView {
    pub name: String,
    pub period: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct SkillsView {
    pub main: Vec<String>,
    pub technical: Vec<String>,
}
