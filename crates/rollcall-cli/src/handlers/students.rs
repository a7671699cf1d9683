use crate::handlers::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, MessageViewModel, StatusBadge,
};
use anyhow::Result;
use rollcall_engine::RegistrationDraft;
use rollcall_runtime::Rollcall;
use rollcall_types::AttendanceDate;

pub struct AddArgs {
    pub class: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<AttendanceDate>,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    pub roll: Option<u32>,
}

pub fn list(workspace: &Rollcall, class: Option<&str>, ctx: &HandlerContext) -> Result<()> {
    let class_id = workspace.resolve_class(class)?;
    let students = workspace.students().list(&class_id)?;
    let vm = presenters::present_student_list(&class_id, &students);

    let mut result = CommandResultViewModel::new(vm);
    if students.is_empty() {
        result = result
            .with_badge(StatusBadge::warning(format!("Class {} has no students", class_id)))
            .with_suggestion(
                Guidance::new("Register one").with_command(format!(
                    "rollcall students add --class {} --first-name .. --last-name .. \
                     --guardian-name .. --guardian-phone ..",
                    class_id
                )),
            );
    }
    ctx.render(result)
}

pub fn add(workspace: &Rollcall, args: AddArgs, ctx: &HandlerContext) -> Result<()> {
    let class_id = workspace.resolve_class(args.class.as_deref())?;
    let students = workspace.students();
    let roll_number = match args.roll {
        Some(roll) => roll,
        None => students.next_roll_number(&class_id)?,
    };

    let draft = RegistrationDraft {
        first_name: args.first_name,
        last_name: args.last_name,
        date_of_birth: args.date_of_birth.map(|d| d.date()),
        guardian_name: args.guardian_name,
        guardian_phone: args.guardian_phone,
        guardian_email: args.guardian_email.filter(|e| !e.trim().is_empty()),
        class_id: class_id.to_string(),
        roll_number: Some(roll_number),
    };
    let student = students.register(draft)?;

    let vm = MessageViewModel {
        message: format!(
            "{} enrolled in class {} as #{}",
            student.display_name(),
            student.class_id,
            student.roll_number
        ),
        path: None,
    };
    ctx.render(
        CommandResultViewModel::new(vm)
            .with_badge(StatusBadge::success("Student registered"))
            .with_suggestion(
                Guidance::new("See the class list")
                    .with_command(format!("rollcall students list --class {}", class_id)),
            ),
    )
}
