use std::collections::HashMap;
use std::hash::Hash;

use super::core::AopError;

/// 空链接标记
const NIL: usize = usize::MAX;

/// 缓存条目：值 + 双向链表指针（指向 slab 下标）
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// LRU 算法缓存
///
/// 有界的 key -> value 缓存，严格按最近最少使用淘汰：
/// `get` 命中与 `set` 都会把条目提升为最近使用，容量满时淘汰最久未使用的条目。
///
/// 内部用 HashMap 索引 + slab 上的侵入式双向链表维护使用顺序，
/// `get` / `set` 均为 O(1) 摊还。本身不做并发控制，由持有方加锁。
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    map: HashMap<K, usize>,
    entries: Vec<Entry<K, V>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// 创建指定容量的缓存
    ///
    /// 容量必须为正整数，否则返回 `AopError::InvalidConfiguration`。
    pub fn new(capacity: usize) -> Result<Self, AopError> {
        if capacity == 0 {
            return Err(AopError::InvalidConfiguration(
                "cache capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            entries: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        })
    }

    /// 获取缓存
    ///
    /// 命中时将条目提升为最近使用；未命中无任何副作用。
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let index = *self.map.get(key)?;
        self.detach(index);
        self.attach_front(index);
        Some(&self.entries[index].value)
    }

    /// 设置缓存
    ///
    /// 已存在的 key 更新值并提升为最近使用；
    /// 新 key 在容量已满时先淘汰最久未使用的条目再插入。
    pub fn set(&mut self, key: K, value: V) {
        if let Some(&index) = self.map.get(&key) {
            self.entries[index].value = value;
            self.detach(index);
            self.attach_front(index);
            return;
        }

        if self.map.len() >= self.capacity {
            // 淘汰链表尾部（最久未使用）
            let victim = self.tail;
            self.detach(victim);
            self.map.remove(&self.entries[victim].key);
            self.free.push(victim);
        }

        let index = match self.free.pop() {
            Some(index) => {
                self.entries[index] = Entry {
                    key: key.clone(),
                    value,
                    prev: NIL,
                    next: NIL,
                };
                index
            }
            None => {
                self.entries.push(Entry {
                    key: key.clone(),
                    value,
                    prev: NIL,
                    next: NIL,
                });
                self.entries.len() - 1
            }
        };

        self.map.insert(key, index);
        self.attach_front(index);
    }

    /// 校验缓存是否存在（不影响使用顺序）
    pub fn has(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// 删除缓存，key 存在时返回 true
    pub fn delete(&mut self, key: &K) -> bool {
        match self.map.remove(key) {
            Some(index) => {
                self.detach(index);
                self.free.push(index);
                true
            }
            None => false,
        }
    }

    /// 获取缓存数量
    pub fn count(&self) -> usize {
        self.map.len()
    }

    /// 清空缓存
    pub fn clear(&mut self) {
        self.map.clear();
        self.entries.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// 缓存容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 从链表中摘除条目
    fn detach(&mut self, index: usize) {
        let (prev, next) = (self.entries[index].prev, self.entries[index].next);
        match prev {
            NIL => self.head = next,
            _ => self.entries[prev].next = next,
        }
        match next {
            NIL => self.tail = prev,
            _ => self.entries[next].prev = prev,
        }
        self.entries[index].prev = NIL;
        self.entries[index].next = NIL;
    }

    /// 将条目挂到链表头部（最近使用）
    fn attach_front(&mut self, index: usize) {
        self.entries[index].prev = NIL;
        self.entries[index].next = self.head;
        match self.head {
            NIL => self.tail = index,
            _ => self.entries[self.head].prev = index,
        }
        self.head = index;
    }
}
