use crate::entities::{draw_record_entity as records, prize_entity as prizes};
use crate::error::AppResult;
use crate::models::{DrawOutcome, WonPrize};
use crate::utils::{DEFAULT_WEIGHT_WINDOW, pick_index};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// 抽奖引擎
///
/// 一次抽奖 = 读取有库存的奖品 -> 按权重选中 -> 扣减库存 -> 写中奖记录,
/// 全部在同一个事务里完成. 同进程内的抽奖经 `draw_gate` 串行执行;
/// 库存扣减使用条件更新 (`stock > 0`), 因此即便有其它写入方,
/// 库存也不会变成负数, 同一件库存也不会被两条记录占用.
#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    weight_window: f64,
    draw_gate: Arc<Mutex<()>>,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection, weight_window: f64) -> Self {
        let weight_window = if weight_window.is_finite() && weight_window > 0.0 {
            weight_window
        } else {
            log::warn!("Invalid weight window {weight_window}, using {DEFAULT_WEIGHT_WINDOW}");
            DEFAULT_WEIGHT_WINDOW
        };
        Self {
            pool,
            weight_window,
            draw_gate: Arc::new(Mutex::new(())),
        }
    }

    /// 抽奖
    ///
    /// 奖池抽完返回 `DrawOutcome::Exhausted`, 不写任何数据.
    /// 存储错误直接返回, 事务回滚, 不重试.
    pub async fn draw(&self) -> AppResult<DrawOutcome> {
        let _guard = self.draw_gate.lock().await;

        let txn = self.pool.begin().await?;
        Self::claim_write_lock(&txn).await?;

        let available = prizes::Entity::find()
            .filter(prizes::Column::Stock.gt(0))
            .order_by_asc(prizes::Column::Id)
            .all(&txn)
            .await?;

        let Some(winner) = self.select_and_secure(&txn, available).await? else {
            txn.rollback().await?;
            log::info!("Draw requested but the prize pool is exhausted");
            return Ok(DrawOutcome::Exhausted);
        };

        records::ActiveModel {
            prize_id: Set(winner.id),
            prize_name: Set(winner.name.clone()),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!("Prize won: id={} name={}", winner.id, winner.name);
        Ok(DrawOutcome::Won(WonPrize::from(winner)))
    }

    /// 选中奖品并扣减一件库存.
    ///
    /// 条件扣减失败 (读取后库存已被其它写入方取走) 时, 把该奖品移出候选集
    /// 并在剩余奖品中重新选择. 每次重试候选集都会变小, 所以循环必然结束;
    /// 候选集为空时返回 `None`.
    async fn select_and_secure(
        &self,
        txn: &DatabaseTransaction,
        mut candidates: Vec<prizes::Model>,
    ) -> Result<Option<prizes::Model>, DbErr> {
        candidates.retain(|p| p.is_available());

        loop {
            let weights: Vec<f64> = candidates.iter().map(|p| p.probability).collect();
            let picked = {
                let mut rng = rand::thread_rng();
                pick_index(&weights, self.weight_window, &mut rng)
            };
            let Some(idx) = picked else {
                return Ok(None);
            };

            let chosen = candidates.remove(idx);
            if Self::take_one(txn, chosen.id).await? {
                return Ok(Some(chosen));
            }

            log::warn!(
                "Prize {} ran out of stock before it could be taken, reselecting",
                chosen.id
            );
        }
    }

    /// 事务的第一条语句就是写语句, 先拿到写锁再读快照.
    ///
    /// SQLite 的延迟事务先读后写时要把读锁升级为写锁, 若此时另一连接
    /// 正在等待写入, 升级会立即返回 SQLITE_BUSY 而不走 busy_timeout.
    /// 一开始就写则只会排队等待. 条件不匹配任何行, 不改变数据.
    async fn claim_write_lock(txn: &DatabaseTransaction) -> Result<(), DbErr> {
        prizes::Entity::update_many()
            .col_expr(prizes::Column::Stock, Expr::col(prizes::Column::Stock).into())
            .filter(prizes::Column::Id.lt(0))
            .exec(txn)
            .await?;
        Ok(())
    }

    /// 原子扣减一件库存, 返回是否成功
    async fn take_one(txn: &DatabaseTransaction, prize_id: i64) -> Result<bool, DbErr> {
        let result = prizes::Entity::update_many()
            .col_expr(prizes::Column::Stock, Expr::col(prizes::Column::Stock).sub(1))
            .col_expr(prizes::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(prizes::Column::Id.eq(prize_id))
            .filter(prizes::Column::Stock.gt(0))
            .exec(txn)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{file_pool, test_pool};
    use sea_orm::PaginatorTrait;

    async fn seed_prize(
        pool: &DatabaseConnection,
        name: &str,
        stock: i64,
        probability: f64,
    ) -> prizes::Model {
        prizes::ActiveModel {
            name: Set(name.to_string()),
            image: Set(Some(format!("/images/{name}.png"))),
            stock: Set(stock),
            probability: Set(probability),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(pool)
        .await
        .unwrap()
    }

    async fn stock_of(pool: &DatabaseConnection, id: i64) -> i64 {
        prizes::Entity::find_by_id(id)
            .one(pool)
            .await
            .unwrap()
            .unwrap()
            .stock
    }

    async fn records_for(pool: &DatabaseConnection, prize_id: i64) -> u64 {
        records::Entity::find()
            .filter(records::Column::PrizeId.eq(prize_id))
            .count(pool)
            .await
            .unwrap()
    }

    fn won_id(outcome: &DrawOutcome) -> i64 {
        match outcome {
            DrawOutcome::Won(prize) => prize.id,
            DrawOutcome::Exhausted => panic!("expected a win"),
        }
    }

    #[tokio::test]
    async fn test_empty_pool_is_exhausted_without_side_effects() {
        let pool = test_pool().await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        seed_prize(&pool, "sold-out", 0, 50.0).await;

        assert_eq!(service.draw().await.unwrap(), DrawOutcome::Exhausted);
        assert_eq!(records::Entity::find().count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_single_unit_then_exhausted() {
        let pool = test_pool().await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        let prize = seed_prize(&pool, "bear", 1, 100.0).await;

        let first = service.draw().await.unwrap();
        assert_eq!(
            first,
            DrawOutcome::Won(WonPrize {
                id: prize.id,
                name: "bear".into(),
                image: Some("/images/bear.png".into()),
            })
        );

        assert_eq!(service.draw().await.unwrap(), DrawOutcome::Exhausted);
        assert_eq!(stock_of(&pool, prize.id).await, 0);
        assert_eq!(records_for(&pool, prize.id).await, 1);
    }

    #[tokio::test]
    async fn test_zero_weights_are_still_winnable() {
        let pool = test_pool().await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        let a = seed_prize(&pool, "a", 5, 0.0).await;
        let b = seed_prize(&pool, "b", 5, 0.0).await;

        for _ in 0..10 {
            let outcome = service.draw().await.unwrap();
            let id = won_id(&outcome);
            assert!(id == a.id || id == b.id);
        }
        assert_eq!(service.draw().await.unwrap(), DrawOutcome::Exhausted);

        assert_eq!(stock_of(&pool, a.id).await, 0);
        assert_eq!(stock_of(&pool, b.id).await, 0);
        assert_eq!(records_for(&pool, a.id).await, 5);
        assert_eq!(records_for(&pool, b.id).await, 5);
    }

    #[tokio::test]
    async fn test_clamped_total_follows_storage_order() {
        let pool = test_pool().await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        let first = seed_prize(&pool, "first", 2, 100.0).await;
        let second = seed_prize(&pool, "second", 2, 100.0).await;
        let third = seed_prize(&pool, "third", 2, 50.0).await;

        // 区间截断为 100, 总是命中当前第一个有库存的奖品
        let mut won = Vec::new();
        for _ in 0..6 {
            won.push(won_id(&service.draw().await.unwrap()));
        }
        assert_eq!(
            won,
            vec![first.id, first.id, second.id, second.id, third.id, third.id]
        );
        assert_eq!(service.draw().await.unwrap(), DrawOutcome::Exhausted);
    }

    #[tokio::test]
    async fn test_stale_snapshot_reselects_remaining_prize() {
        let pool = test_pool().await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        let gone = seed_prize(&pool, "gone", 0, 100.0).await;
        let left = seed_prize(&pool, "left", 2, 0.0).await;

        // 模拟读取时仍有库存的快照
        let mut stale = gone.clone();
        stale.stock = 1;

        let txn = pool.begin().await.unwrap();
        let chosen = service
            .select_and_secure(&txn, vec![stale, left.clone()])
            .await
            .unwrap()
            .unwrap();
        txn.commit().await.unwrap();

        assert_eq!(chosen.id, left.id);
        assert_eq!(stock_of(&pool, gone.id).await, 0);
        assert_eq!(stock_of(&pool, left.id).await, 1);
    }

    #[tokio::test]
    async fn test_stale_snapshot_with_nothing_left_yields_none() {
        let pool = test_pool().await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        let gone = seed_prize(&pool, "gone", 0, 10.0).await;

        let mut stale = gone.clone();
        stale.stock = 3;

        let txn = pool.begin().await.unwrap();
        let chosen = service.select_and_secure(&txn, vec![stale]).await.unwrap();
        txn.rollback().await.unwrap();

        assert!(chosen.is_none());
        assert_eq!(stock_of(&pool, gone.id).await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_draws_never_oversell_last_unit() {
        let pool = test_pool().await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        let prize = seed_prize(&pool, "last", 1, 100.0).await;

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.draw().await })
            })
            .collect();

        let mut wins = 0;
        let mut exhausted = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                DrawOutcome::Won(won) => {
                    assert_eq!(won.id, prize.id);
                    wins += 1;
                }
                DrawOutcome::Exhausted => exhausted += 1,
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(exhausted, 15);
        assert_eq!(stock_of(&pool, prize.id).await, 0);
        assert_eq!(records_for(&pool, prize.id).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_draws_match_total_stock() {
        let pool = test_pool().await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        let a = seed_prize(&pool, "a", 2, 70.0).await;
        let b = seed_prize(&pool, "b", 3, 30.0).await;

        let handles: Vec<_> = (0..30)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.draw().await })
            })
            .collect();

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_won() {
                wins += 1;
            }
        }

        assert_eq!(wins, 5);
        assert_eq!(stock_of(&pool, a.id).await, 0);
        assert_eq!(stock_of(&pool, b.id).await, 0);
        assert_eq!(records_for(&pool, a.id).await, 2);
        assert_eq!(records_for(&pool, b.id).await, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_draws_succeed_while_admin_updates_prizes() {
        let (pool, path) = file_pool("draw_vs_admin", 5).await;
        let service = DrawService::new(pool.clone(), DEFAULT_WEIGHT_WINDOW);
        let prize = seed_prize(&pool, "plush", 200, 100.0).await;
        let prize_id = prize.id;

        let draws: Vec<_> = (0..100)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.draw().await })
            })
            .collect();
        let renames: Vec<_> = (0..100)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    prizes::Entity::update_many()
                        .col_expr(prizes::Column::Name, Expr::value(format!("plush-{i}")))
                        .filter(prizes::Column::Id.eq(prize_id))
                        .exec(&pool)
                        .await
                })
            })
            .collect();

        for handle in draws {
            assert!(handle.await.unwrap().unwrap().is_won());
        }
        for handle in renames {
            assert_eq!(handle.await.unwrap().unwrap().rows_affected, 1);
        }

        assert_eq!(stock_of(&pool, prize.id).await, 100);
        assert_eq!(records_for(&pool, prize.id).await, 100);

        drop(service);
        drop(pool);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_invalid_window_falls_back_to_default() {
        let pool = test_pool().await;
        let service = DrawService::new(pool, f64::NAN);
        assert_eq!(service.weight_window, DEFAULT_WEIGHT_WINDOW);
    }
}
