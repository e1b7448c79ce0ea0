use log::info;
use serde::Serialize;

use crate::TranslationError;

const SKILL: &str = "Skill";
const ACTION_SKILL_TYPE: &str = "Action";

/// Names of the skill being generated, all derived from the root name of its model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillIdentity {
    pub raw_root_name: String,
    pub skill_base_name: String,
    pub skill_type_suffix: String,
    pub skill_type_lowercase: String,
    pub class_name: String,
    pub class_name_snake_case: String,
}

impl SkillIdentity {
    /// Splits a root name such as `FirstTemplateSkillCPP` on its first `Skill`.
    pub fn derive(root_name: &str) -> Result<Self, TranslationError> {
        let (base, suffix) = root_name
            .split_once(SKILL)
            .ok_or_else(|| TranslationError::NotASkillModel(root_name.to_owned()))?;
        if suffix.is_empty() {
            return Err(TranslationError::MissingSkillType(root_name.to_owned()));
        }
        let class_name = format!("{base}{SKILL}");
        let identity = SkillIdentity {
            raw_root_name: root_name.to_owned(),
            skill_base_name: base.to_owned(),
            skill_type_suffix: suffix.to_owned(),
            skill_type_lowercase: suffix.to_lowercase(),
            class_name_snake_case: to_snake_case(&class_name),
            class_name,
        };
        info!(
            target: "resolver",
            "skill '{}' of type '{}'",
            identity.class_name, identity.skill_type_suffix
        );
        Ok(identity)
    }

    pub fn is_action_skill(&self) -> bool {
        self.skill_type_suffix == ACTION_SKILL_TYPE
    }

    pub fn data_model_class_name(&self) -> String {
        format!("{}DataModel", self.class_name)
    }
}

pub fn derive_identity(root_name: &str) -> Result<SkillIdentity, TranslationError> {
    SkillIdentity::derive(root_name)
}

/// Puts `_` before every uppercase letter except a leading one, then lowercases everything.
pub fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            snake.push('_');
        }
        snake.extend(c.to_lowercase());
    }
    snake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity() -> Result<(), TranslationError> {
        let identity = derive_identity("FirstTemplateSkillCPP")?;
        assert_eq!(identity.skill_base_name, "FirstTemplate");
        assert_eq!(identity.skill_type_suffix, "CPP");
        assert_eq!(identity.skill_type_lowercase, "cpp");
        assert_eq!(identity.class_name, "FirstTemplateSkill");
        assert_eq!(identity.class_name_snake_case, "first_template_skill");
        assert_eq!(identity.data_model_class_name(), "FirstTemplateSkillDataModel");
        assert!(!identity.is_action_skill());
        Ok(())
    }

    #[test]
    fn action_skill() -> Result<(), TranslationError> {
        assert!(derive_identity("GoToSkillAction")?.is_action_skill());
        Ok(())
    }

    #[test]
    fn split_on_first_occurrence() -> Result<(), TranslationError> {
        let identity = derive_identity("SkillSkillCondition")?;
        assert_eq!(identity.skill_base_name, "");
        assert_eq!(identity.skill_type_suffix, "SkillCondition");
        assert_eq!(identity.class_name, "Skill");
        Ok(())
    }

    #[test]
    fn not_a_skill() {
        assert!(matches!(
            derive_identity("FirstTemplate"),
            Err(TranslationError::NotASkillModel(_))
        ));
    }

    #[test]
    fn missing_type() {
        assert!(matches!(
            derive_identity("BatteryLevelSkill"),
            Err(TranslationError::MissingSkillType(_))
        ));
    }

    #[test]
    fn snake_case() {
        assert_eq!(to_snake_case("FirstTemplateSkill"), "first_template_skill");
        assert_eq!(to_snake_case("goTo"), "go_to");
        assert_eq!(to_snake_case("IsAtPOI"), "is_at_p_o_i");
        assert_eq!(to_snake_case(""), "");
    }
}
