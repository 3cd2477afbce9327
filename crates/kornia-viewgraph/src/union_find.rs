/// A disjoint-set forest over dense indices `0..len`.
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    /// Creates `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    /// Returns the root of the set containing `id`, compressing the path on the way.
    pub fn find(&mut self, mut id: usize) -> usize {
        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[id] != root {
            let next = self.parent[id];
            self.parent[id] = root;
            id = next;
        }

        root
    }

    /// Merges the sets containing `a` and `b`, returning the new root.
    ///
    /// The smaller set is attached below the larger one.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let aroot = self.find(a);
        let broot = self.find(b);
        if aroot == broot {
            return aroot;
        }

        let (big, small) = if self.size[aroot] >= self.size[broot] {
            (aroot, broot)
        } else {
            (broot, aroot)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        big
    }
}
