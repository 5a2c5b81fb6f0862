//! 用户存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, TutorDeskError};
use crate::models::users::{
    entities::{User, UserSummary},
    requests::{CreateUser, UpdateUser, UserListParams},
    responses::UserListResponse,
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            full_name: Set(req.full_name),
            avatar: Set(req.avatar),
            phone_number: Set(req.phone_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建用户失败"))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 批量查询用户摘要，用于在列表中嵌入用户信息
    pub(crate) async fn load_user_summaries(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, UserSummary>> {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Users::find()
            .filter(Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询用户信息失败: {e}")))?;

        Ok(users.into_iter().map(|m| (m.id, m.into_summary())).collect())
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListParams,
    ) -> Result<UserListResponse> {
        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(like_contains(search.trim())))
                    .add(Column::FullName.like(like_contains(search.trim()))),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let (users, pagination) = self
            .paginate_select(select, query.page, query.size, "用户")
            .await?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination,
        })
    }

    /// 更新用户资料
    pub async fn update_user_impl(&self, id: i64, update: UpdateUser) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }

        if let Some(avatar) = update.avatar {
            model.avatar = Set(Some(avatar));
        }

        if let Some(phone_number) = update.phone_number {
            model.phone_number = Set(Some(phone_number));
        }

        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
