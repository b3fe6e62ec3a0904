//! 运行时堆
//!
//! VM 独占所有堆对象。每次分配都登记在对象表中，
//! 对象只在 VM 关闭时统一释放，不会提前释放，也不会重复释放。

use std::fmt;

/// 堆对象句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef(usize);

impl ObjRef {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// 字符串数据：借用常量池，或运行时分配
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrData<'a> {
    Borrowed(&'a str),
    Owned(String),
}

/// 字符串对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrObject<'a> {
    data: StrData<'a>,
}

impl<'a> StrObject<'a> {
    #[inline]
    pub fn as_str(&self) -> &str {
        match &self.data {
            StrData::Borrowed(s) => s,
            StrData::Owned(s) => s,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 是否拥有自己的字符数据
    #[inline]
    pub fn owns_data(&self) -> bool {
        matches!(self.data, StrData::Owned(_))
    }

    #[inline]
    pub fn data(&self) -> &StrData<'a> {
        &self.data
    }
}

impl fmt::Display for StrObject<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 堆统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// 分配过的对象总数
    pub allocated: usize,
    /// 释放过的对象总数
    pub released: usize,
    /// 当前存活对象数
    pub live: usize,
    /// 存活对象中自有字符数据的字节数
    pub owned_bytes: usize,
}

impl HeapStats {
    /// 是否所有对象都恰好释放一次
    pub fn is_balanced(&self) -> bool {
        self.allocated == self.released && self.live == 0
    }
}

/// 对象表
#[derive(Debug, Default)]
pub struct Heap<'a> {
    objects: Vec<StrObject<'a>>,
    allocated: usize,
    released: usize,
}

impl<'a> Heap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记借用常量池的字符串
    pub fn alloc_borrowed(
        &mut self,
        text: &'a str,
    ) -> ObjRef {
        self.alloc(StrData::Borrowed(text))
    }

    /// 登记运行时分配的字符串
    pub fn alloc_owned(
        &mut self,
        text: String,
    ) -> ObjRef {
        self.alloc(StrData::Owned(text))
    }

    fn alloc(
        &mut self,
        data: StrData<'a>,
    ) -> ObjRef {
        self.objects.push(StrObject { data });
        self.allocated += 1;
        ObjRef(self.objects.len() - 1)
    }

    /// 获取对象
    #[inline]
    pub fn get(
        &self,
        obj: ObjRef,
    ) -> Option<&StrObject<'a>> {
        self.objects.get(obj.0)
    }

    /// 存活对象数
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn stats(&self) -> HeapStats {
        HeapStats {
            allocated: self.allocated,
            released: self.released,
            live: self.objects.len(),
            owned_bytes: self
                .objects
                .iter()
                .filter(|o| o.owns_data())
                .map(|o| o.len())
                .sum(),
        }
    }

    /// 释放所有对象，返回本次释放的数量
    ///
    /// 释放后旧句柄全部失效。
    pub fn release_all(&mut self) -> usize {
        let count = self.objects.len();
        self.objects.clear();
        self.released += count;
        if count > 0 {
            tracing::trace!("Released {} heap objects", count);
        }
        count
    }
}

impl Drop for Heap<'_> {
    fn drop(&mut self) {
        self.release_all();
    }
}
