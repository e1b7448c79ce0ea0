use std::ffi::OsString;
use std::fs;
use std::path::Path;

use clap::Parser;
use model2code::m2c_core::{CommunicationPattern, TranslationError};
use model2code::*;

const ASSETS: &str = "./tests/assets";

fn read(dir: &Path, path: &str) -> anyhow::Result<String> {
    Ok(fs::read_to_string(dir.join(path))?)
}

#[test]
fn fetch_with_data_model() -> anyhow::Result<()> {
    let assets = Path::new(ASSETS);
    let out = tempfile::tempdir()?;
    // interfaces are declared inside the model itself
    let (translation, written) = Translator::new(
        assets.join("fetch/model.scxml"),
        assets.join("templates"),
        out.path(),
    )
    .with_data_model(true)
    .run()?;
    assert_eq!(written.len(), 7);
    assert_eq!(translation.identity.class_name, "FetchSkill");

    let send_goal = translation
        .registry
        .get("Arm.Move.SendGoal")
        .expect("Arm.Move.SendGoal");
    assert_eq!(send_goal.pattern, CommunicationPattern::ActionClient);
    assert_eq!(send_goal.interface_name, "arm_interfaces");

    let header = read(out.path(), "include/FetchSkill.h")?;
    assert!(header.contains("#include <arm_interfaces/action/move.hpp>"));
    assert!(header.contains("#include \"FetchSkillDataModel.h\""));
    assert!(header.contains("FetchSkillDataModel m_dataModel;"));
    assert!(header.contains("enum class Status { undefined, running, success, failure };"));
    assert!(header.contains("void tick("));
    assert!(header.contains("void halt("));
    assert!(header.contains("void send_goal_Move(const QVariantMap& data);"));
    assert!(!header.contains("/*"));

    let source = read(out.path(), "src/FetchSkill.cpp")?;
    assert!(source.contains("m_stateMachine.setDataModel(&m_dataModel);"));
    assert!(source.contains(
        "m_client_Move = rclcpp_action::create_client<arm_interfaces::action::Move>(m_node, \"/Arm/Move\");"
    ));
    assert!(source.contains("connectToEvent(\"Arm.Move.SendGoal\""));
    assert!(source.contains("m_feedback_Move = true;"));
    assert!(source.contains("m_result_Move = true;"));
    assert!(source.contains(
        "goal.pose = convert<decltype(goal.pose)>(data[\"pose\"].toString().toStdString());"
    ));
    assert!(source.contains("data.insert(\"progress\", float(feedback->progress));"));
    assert!(source.contains("submitEvent(\"Arm.Move.GoalResponse\")"));
    assert!(source.contains("submitEvent(\"Arm.Move.ResultResponse\")"));
    assert!(source.contains("connectToEvent(\"TICK_RESPONSE\""));
    assert!(source.contains("connectToEvent(\"HALT_RESPONSE\""));
    // no service is used
    assert!(!source.contains("create_client<arm_interfaces::srv"));
    assert!(!source.contains("/*"));
    assert!(!source.contains('$'));

    let data_model = read(out.path(), "include/FetchSkillDataModel.h")?;
    assert!(data_model.contains("class FetchSkillDataModel : public QScxmlCppDataModel"));
    assert_eq!(
        read(out.path(), "src/FetchSkillDataModel.cpp")?,
        "#include \"FetchSkillDataModel.h\"\n"
    );

    let cmake = read(out.path(), "CMakeLists.txt")?;
    assert!(cmake.starts_with("project(fetch_skill)"));
    assert!(cmake.contains("find_package(arm_interfaces REQUIRED)"));
    assert!(cmake.contains("src/FetchSkill.cpp\n    src/FetchSkillDataModel.cpp\n)"));

    let package = read(out.path(), "package.xml")?;
    assert!(package.contains("<description>Action skill Fetch</description>"));
    assert!(package.contains("<depend>arm_interfaces</depend>"));
    Ok(())
}

#[test]
fn charge_from_command_line() -> anyhow::Result<()> {
    let assets = Path::new(ASSETS);
    let out = tempfile::tempdir()?;
    let dump = out.path().join("registry.json");
    let args: Vec<OsString> = vec![
        "model2code".into(),
        assets.join("charge/model.scxml").into(),
        assets.join("templates").into(),
        out.path().into(),
        "--interface".into(),
        assets.join("charge/interfaces.xml").into(),
        "--layout".into(),
        assets.join("charge/layout.json").into(),
        "--dump-registry".into(),
        dump.clone().into(),
    ];
    let cli = Cli::try_parse_from(args)?;
    cli.run()?;

    assert!(!out.path().join("include/ChargeSkillDataModel.h").exists());
    let header = read(out.path(), "include/ChargeSkill.h")?;
    assert!(header.contains("#include <charger_interfaces/srv/is_charging.hpp>"));
    assert!(header.contains("enum class Status { undefined, success, failure };"));
    assert!(header.contains("void tick("));
    assert!(!header.contains("void halt("));
    assert!(!header.contains("DataModel"));
    assert!(!header.contains("/*INTERFACES_LIST*/"));
    // the layout strips only the interface list
    assert!(header.contains("/*ACTION_LIST_H*/"));

    let source = read(out.path(), "src/ChargeSkill.cpp")?;
    assert!(source.contains("/*SEND_EVENT_LIST*/"));
    assert!(source.contains(
        "auto clientisCharging = m_node->create_client<charger_interfaces::srv::IsCharging>(\"/Charger/isCharging\");"
    ));
    assert!(source.contains("data.insert(\"charging\", response->charging.c_str());"));
    assert!(source.contains("submitEvent(\"Charger.isCharging.Return\", data)"));
    assert!(!source.contains("HALT_RESPONSE"));

    let dump: serde_json::Value = serde_json::from_str(&fs::read_to_string(&dump)?)?;
    assert_eq!(dump["skill"]["class_name"], "ChargeSkill");
    assert_eq!(dump["control_events"]["cmd_tick"], true);
    assert_eq!(dump["control_events"]["cmd_halt"], false);
    let events = dump["events"].as_array().expect("events");
    assert_eq!(events.len(), 4);
    assert_eq!(events[1]["event_identifier"], "Charger.isCharging.Return");
    assert_eq!(events[1]["pattern"], "service-client");
    assert_eq!(events[1]["interface_name"], "charger_interfaces");
    Ok(())
}

#[test]
fn not_a_skill() -> anyhow::Result<()> {
    let assets = Path::new(ASSETS);
    let out = tempfile::tempdir()?;
    let err = Translator::new(
        assets.join("not_a_skill.scxml"),
        assets.join("templates"),
        out.path(),
    )
    .run()
    .expect_err("the model name has no skill type");
    assert!(matches!(
        err.downcast_ref::<TranslationError>(),
        Some(TranslationError::NotASkillModel(name)) if name == "BatteryMonitor"
    ));
    // nothing is written on failure
    assert_eq!(fs::read_dir(out.path())?.count(), 0);
    Ok(())
}

#[test]
fn missing_interface_document() -> anyhow::Result<()> {
    let assets = Path::new(ASSETS);
    let out = tempfile::tempdir()?;
    let err = Translator::new(
        assets.join("charge/model.scxml"),
        assets.join("templates"),
        out.path(),
    )
    .with_interface(assets.join("charge/missing.xml"))
    .translate()
    .expect_err("the interface document does not exist");
    assert!(format!("{err:#}").contains("failed to load interfaces"));
    Ok(())
}
