//! Goals and their ordered subgoals.

use chrono::NaiveDate;
use uuid::Uuid;

use api_types::goal::{GoalInsert, GoalPatch, GoalRow, SubgoalInsert, SubgoalPatch, SubgoalRow};

use crate::{
    StoreError,
    collection::Collection,
    error::ResultStore,
    gateway::TableGateway,
    records::{Goal, Subgoal},
};

/// Form payload for creating or editing a goal.
#[derive(Clone, Debug, Default)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub target_date: Option<NaiveDate>,
}

/// Local reflected store for the goals view.
#[derive(Debug, Default)]
pub struct GoalList {
    user_id: Uuid,
    pub goals: Collection<Goal>,
    pub subgoals: Collection<Subgoal>,
}

impl GoalList {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            goals: Collection::new(),
            subgoals: Collection::new(),
        }
    }

    pub async fn refetch<G: TableGateway>(&mut self, gateway: &G) -> ResultStore<()> {
        let goals: Vec<GoalRow> = gateway.select_all().await?;
        let subgoals: Vec<SubgoalRow> = gateway.select_all().await?;
        self.goals
            .replace_all(goals.into_iter().map(Goal::from).collect());
        self.subgoals
            .replace_all(subgoals.into_iter().map(Subgoal::from).collect());
        Ok(())
    }

    pub async fn create_goal<G: TableGateway>(
        &mut self,
        gateway: &G,
        draft: &GoalDraft,
    ) -> ResultStore<Uuid> {
        let title = required(&draft.title, "Goal title is required")?;
        let row: GoalRow = gateway
            .insert(&GoalInsert {
                title,
                description: non_empty(&draft.description),
                target_date: draft.target_date,
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.goals.merge(Goal::from(row));
        Ok(id)
    }

    pub async fn update_goal<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        draft: &GoalDraft,
    ) -> ResultStore<()> {
        let title = required(&draft.title, "Goal title is required")?;
        let goal = self.goals.get(id).ok_or(StoreError::NotFound("goal"))?;
        let row: GoalRow = gateway
            .update(
                id,
                &GoalPatch {
                    title,
                    description: non_empty(&draft.description),
                    target_date: draft.target_date,
                    completed: goal.completed,
                },
            )
            .await?;
        self.goals.merge(Goal::from(row));
        Ok(())
    }

    pub async fn toggle_goal<G: TableGateway>(&mut self, gateway: &G, id: Uuid) -> ResultStore<()> {
        let goal = self.goals.get(id).ok_or(StoreError::NotFound("goal"))?;
        let row: GoalRow = gateway
            .update(
                id,
                &GoalPatch {
                    title: goal.title.clone(),
                    description: goal.description.clone(),
                    target_date: goal.target_date,
                    completed: !goal.completed,
                },
            )
            .await?;
        self.goals.merge(Goal::from(row));
        Ok(())
    }

    /// Deleting a goal drops its subgoals locally; the backend cascades.
    pub async fn delete_goal<G: TableGateway>(&mut self, gateway: &G, id: Uuid) -> ResultStore<()> {
        gateway.delete::<GoalRow>(id).await?;
        self.goals.remove(id);
        let orphans: Vec<Uuid> = self
            .subgoals
            .iter()
            .filter(|subgoal| subgoal.goal_id == id)
            .map(|subgoal| subgoal.id)
            .collect();
        for subgoal_id in orphans {
            self.subgoals.remove(subgoal_id);
        }
        Ok(())
    }

    /// Append a subgoal at the end of the parent's ordering.
    pub async fn add_subgoal<G: TableGateway>(
        &mut self,
        gateway: &G,
        goal_id: Uuid,
        title: &str,
    ) -> ResultStore<Uuid> {
        let title = required(title, "Subgoal title is required")?;
        if !self.goals.contains(goal_id) {
            return Err(StoreError::NotFound("goal"));
        }
        let position = self
            .subgoals
            .iter()
            .filter(|subgoal| subgoal.goal_id == goal_id)
            .map(|subgoal| subgoal.position)
            .max()
            .map_or(0, |max| max + 1);
        let row: SubgoalRow = gateway
            .insert(&SubgoalInsert {
                goal_id,
                title,
                position,
            })
            .await?;
        let id = row.id;
        self.subgoals.merge(Subgoal::from(row));
        Ok(id)
    }

    pub async fn toggle_subgoal<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        let subgoal = self
            .subgoals
            .get(id)
            .ok_or(StoreError::NotFound("subgoal"))?;
        let row: SubgoalRow = gateway
            .update(
                id,
                &SubgoalPatch {
                    title: subgoal.title.clone(),
                    completed: !subgoal.completed,
                    position: subgoal.position,
                },
            )
            .await?;
        self.subgoals.merge(Subgoal::from(row));
        Ok(())
    }

    pub async fn delete_subgoal<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        gateway.delete::<SubgoalRow>(id).await?;
        self.subgoals.remove(id);
        Ok(())
    }

    /// Subgoals of a goal in display order.
    pub fn subgoals_of(&self, goal_id: Uuid) -> Vec<&Subgoal> {
        let mut out: Vec<&Subgoal> = self
            .subgoals
            .iter()
            .filter(|subgoal| subgoal.goal_id == goal_id)
            .collect();
        out.sort_by_key(|subgoal| subgoal.position);
        out
    }

    /// (completed, total) subgoal counts backing the progress gauge.
    pub fn progress(&self, goal_id: Uuid) -> (usize, usize) {
        let subgoals = self.subgoals_of(goal_id);
        let done = subgoals.iter().filter(|subgoal| subgoal.completed).count();
        (done, subgoals.len())
    }
}

fn required(value: &str, message: &str) -> ResultStore<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
