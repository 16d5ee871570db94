//! Goals section: list, completion toggles, ordered subgoals.

use uuid::Uuid;

use store::goals::{GoalDraft, GoalList};
use store::records::Goal;
use store::{DialogState, SortOrder, ViewFilter, project};

use crate::error::Result;
use crate::ui::keymap::AppAction;

use super::{App, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalField {
    Title,
    Description,
    TargetDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalForm {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    /// Typed as YYYY-MM-DD, parsed on submit.
    pub target_date: String,
    pub focus: GoalField,
}

impl GoalForm {
    fn create() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            target_date: String::new(),
            focus: GoalField::Title,
        }
    }

    fn edit(goal: &Goal) -> Self {
        Self {
            id: Some(goal.id),
            title: goal.title.clone(),
            description: goal.description.clone().unwrap_or_default(),
            target_date: goal
                .target_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            focus: GoalField::Title,
        }
    }

    fn text_field_mut(&mut self) -> &mut String {
        match self.focus {
            GoalField::Title => &mut self.title,
            GoalField::Description => &mut self.description,
            GoalField::TargetDate => &mut self.target_date,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            GoalField::Title => GoalField::Description,
            GoalField::Description => GoalField::TargetDate,
            GoalField::TargetDate => GoalField::Title,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgoalForm {
    pub goal_id: Uuid,
    pub title: String,
}

#[derive(Debug)]
pub struct GoalsState {
    pub store: GoalList,
    pub selected: usize,
    pub selected_subgoal: usize,
    pub filter: ViewFilter,
    pub sort: SortOrder,
    pub search_active: bool,
    pub dialog: DialogState<GoalForm>,
    pub subgoal_dialog: DialogState<SubgoalForm>,
}

impl GoalsState {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            store: GoalList::new(user_id),
            selected: 0,
            selected_subgoal: 0,
            filter: ViewFilter::default(),
            sort: SortOrder::default(),
            search_active: false,
            dialog: DialogState::default(),
            subgoal_dialog: DialogState::default(),
        }
    }

    pub fn visible(&self) -> Vec<&Goal> {
        project(self.store.goals.items(), &self.filter, self.sort)
    }

    pub fn editing(&self) -> bool {
        self.search_active || self.dialog.is_open() || self.subgoal_dialog.is_open()
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.visible().get(self.selected).map(|goal| goal.id)
    }

    fn selected_subgoal_id(&self) -> Option<Uuid> {
        let goal_id = self.selected_id()?;
        self.store
            .subgoals_of(goal_id)
            .get(self.selected_subgoal)
            .map(|subgoal| subgoal.id)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.clamp_subgoal_selection();
    }

    fn clamp_subgoal_selection(&mut self) {
        let len = self
            .selected_id()
            .map_or(0, |id| self.store.subgoals_of(id).len());
        self.selected_subgoal = self.selected_subgoal.min(len.saturating_sub(1));
    }

    fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
        self.selected_subgoal = 0;
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.selected_subgoal = 0;
    }
}

impl App {
    pub(crate) async fn goals_key(&mut self, action: AppAction) -> Result<()> {
        if self.state.goals.subgoal_dialog.is_open() {
            self.subgoal_dialog_key(action).await;
            return Ok(());
        }
        if self.state.goals.dialog.is_open() {
            self.goal_dialog_key(action).await;
            return Ok(());
        }
        if self.state.goals.search_active {
            let goals = &mut self.state.goals;
            match action {
                AppAction::Input(ch) => {
                    goals.filter.search.push(ch);
                    goals.clamp_selection();
                }
                AppAction::Backspace => {
                    goals.filter.search.pop();
                }
                AppAction::Submit | AppAction::Cancel => goals.search_active = false,
                _ => {}
            }
            return Ok(());
        }

        match action {
            AppAction::Up => self.state.goals.select_prev(),
            AppAction::Down => self.state.goals.select_next(),
            AppAction::Input(ch) => match ch {
                'j' => self.state.goals.select_next(),
                'k' => self.state.goals.select_prev(),
                'n' => self.state.goals.dialog.open(GoalForm::create()),
                'e' => {
                    if let Some(id) = self.state.goals.selected_id()
                        && let Some(goal) = self.state.goals.store.goals.get(id)
                    {
                        let form = GoalForm::edit(goal);
                        self.state.goals.dialog.open(form);
                    }
                }
                'd' => self.delete_goal().await,
                ' ' => self.toggle_goal().await,
                'a' => {
                    if let Some(goal_id) = self.state.goals.selected_id() {
                        self.state.goals.subgoal_dialog.open(SubgoalForm {
                            goal_id,
                            title: String::new(),
                        });
                    }
                }
                'J' => {
                    let goals = &mut self.state.goals;
                    goals.selected_subgoal += 1;
                    goals.clamp_subgoal_selection();
                }
                'K' => {
                    self.state.goals.selected_subgoal =
                        self.state.goals.selected_subgoal.saturating_sub(1);
                }
                't' => self.toggle_subgoal().await,
                'D' => self.delete_subgoal().await,
                '/' => {
                    self.state.goals.filter.search.clear();
                    self.state.goals.search_active = true;
                }
                'o' => self.state.goals.sort = self.state.goals.sort.next(),
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }

    async fn goal_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.goals.dialog.close(),
            AppAction::NextField => {
                if let Some(form) = self.state.goals.dialog.form_mut() {
                    form.next_focus();
                }
            }
            AppAction::Backspace => {
                if let Some(form) = self.state.goals.dialog.form_mut() {
                    form.text_field_mut().pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.goals.dialog.form_mut() {
                    form.text_field_mut().push(ch);
                }
            }
            AppAction::Submit => self.submit_goal().await,
            _ => {}
        }
    }

    async fn submit_goal(&mut self) {
        let target_date = match self.state.goals.dialog.form() {
            Some(form) if !form.target_date.trim().is_empty() => {
                match parse_date(&form.target_date) {
                    Some(date) => Some(date),
                    None => {
                        self.state
                            .goals
                            .dialog
                            .reject("Target date must be YYYY-MM-DD".to_string());
                        return;
                    }
                }
            }
            _ => None,
        };
        let Some(form) = self.state.goals.dialog.begin_submit() else {
            return;
        };
        let draft = GoalDraft {
            title: form.title.clone(),
            description: form.description.clone(),
            target_date,
        };
        let result = match form.id {
            Some(id) => self
                .state
                .goals
                .store
                .update_goal(&self.gateway, id, &draft)
                .await
                .map(|_| "Goal updated"),
            None => self
                .state
                .goals
                .store
                .create_goal(&self.gateway, &draft)
                .await
                .map(|_| "Goal created"),
        };
        match result {
            Ok(message) => {
                self.state.goals.dialog.resolve(Ok(()));
                self.state.goals.clamp_selection();
                self.toast_success(message);
            }
            Err(err) => self.state.goals.dialog.resolve(Err(err.to_string())),
        }
    }

    async fn subgoal_dialog_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.goals.subgoal_dialog.close(),
            AppAction::Backspace => {
                if let Some(form) = self.state.goals.subgoal_dialog.form_mut() {
                    form.title.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(form) = self.state.goals.subgoal_dialog.form_mut() {
                    form.title.push(ch);
                }
            }
            AppAction::Submit => self.submit_subgoal().await,
            _ => {}
        }
    }

    async fn submit_subgoal(&mut self) {
        let Some(form) = self.state.goals.subgoal_dialog.begin_submit() else {
            return;
        };
        let result = self
            .state
            .goals
            .store
            .add_subgoal(&self.gateway, form.goal_id, &form.title)
            .await;
        match result {
            Ok(_) => {
                self.state.goals.subgoal_dialog.resolve(Ok(()));
                self.toast_success("Subgoal added");
            }
            Err(err) => self.state.goals.subgoal_dialog.resolve(Err(err.to_string())),
        }
    }

    async fn toggle_goal(&mut self) {
        let Some(id) = self.state.goals.selected_id() else {
            return;
        };
        if let Err(err) = self.state.goals.store.toggle_goal(&self.gateway, id).await {
            self.toast_error(err.to_string());
        }
    }

    async fn toggle_subgoal(&mut self) {
        let Some(id) = self.state.goals.selected_subgoal_id() else {
            return;
        };
        if let Err(err) = self
            .state
            .goals
            .store
            .toggle_subgoal(&self.gateway, id)
            .await
        {
            self.toast_error(err.to_string());
        }
    }

    async fn delete_subgoal(&mut self) {
        let Some(id) = self.state.goals.selected_subgoal_id() else {
            return;
        };
        match self
            .state
            .goals
            .store
            .delete_subgoal(&self.gateway, id)
            .await
        {
            Ok(()) => {
                self.state.goals.clamp_subgoal_selection();
                self.toast_success("Subgoal deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }

    async fn delete_goal(&mut self) {
        let Some(id) = self.state.goals.selected_id() else {
            return;
        };
        match self.state.goals.store.delete_goal(&self.gateway, id).await {
            Ok(()) => {
                self.state.goals.clamp_selection();
                self.toast_success("Goal deleted");
            }
            Err(err) => self.toast_error(err.to_string()),
        }
    }
}
