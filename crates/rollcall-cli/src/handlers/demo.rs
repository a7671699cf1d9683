use crate::handlers::HandlerContext;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, MessageViewModel, StatusBadge,
};
use anyhow::Result;
use rollcall_runtime::Rollcall;
use rollcall_types::ClassId;

pub fn handle(workspace: &Rollcall, class: &str, ctx: &HandlerContext) -> Result<()> {
    let class_id: ClassId = class.parse()?;
    let added = workspace.seed_demo(&class_id)?;

    let (badge, message) = if added == 0 {
        (
            StatusBadge::info("Nothing to do"),
            format!("Class {} already has students", class_id),
        )
    } else {
        (
            StatusBadge::success("Demo class ready"),
            format!("Enrolled {} sample students in class {}", added, class_id),
        )
    };
    let vm = MessageViewModel {
        message,
        path: Some(workspace.data_dir().display().to_string()),
    };
    ctx.render(
        CommandResultViewModel::new(vm)
            .with_badge(badge)
            .with_suggestion(
                Guidance::new("Mark attendance")
                    .with_command(format!("rollcall attendance --class {}", class_id)),
            )
            .with_suggestion(
                Guidance::new("Print the sheet")
                    .with_command(format!("rollcall roster show --class {}", class_id)),
            ),
    )
}
